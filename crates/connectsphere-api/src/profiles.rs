use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use connectsphere_types::api::{Claims, ProfilePost, ProfileResponse};

use crate::auth::AppStateInner;
use crate::error::{ApiError, not_found};
use crate::parse_uuid;

/// Public profile view: the user's bio and photo plus their listings,
/// newest first.
pub async fn view_profile(
    State(state): State<Arc<AppStateInner>>,
    Path(username): Path<String>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_username(&username)?
        .ok_or_else(not_found)?;

    let posts: Vec<ProfilePost> = state
        .db
        .posts_by_user(&user.id)?
        .into_iter()
        .map(|row| ProfilePost {
            id: parse_uuid("post id", &row.id),
            image: row.image,
            description: row.description,
            status: row.status,
            price_cents: row.price_cents,
            min_trade_value_cents: row.min_trade_value_cents,
            sold: row.sold,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ProfileResponse {
        user_id: parse_uuid("user id", &user.id),
        username: user.username,
        bio: user.bio,
        profile_photo: user.profile_photo,
        posts,
    }))
}
