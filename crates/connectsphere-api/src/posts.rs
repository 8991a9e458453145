use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use connectsphere_db::models::NewPost;
use connectsphere_types::api::{Claims, CreatePostRequest, CreatePostResponse, FeedPost};
use connectsphere_types::models::{PostStatus, is_valid_art_type};

use crate::auth::AppStateInner;
use crate::error::{ApiError, internal, validation};
use crate::parse_uuid;

pub async fn create_post(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.image.trim().is_empty() {
        return Err(validation("image is required"));
    }
    if let Some(art_type) = req.art_type.as_deref() {
        if !is_valid_art_type(art_type) {
            return Err(validation("unknown art type"));
        }
    }
    match req.status {
        PostStatus::Sell => match req.price_cents {
            Some(price) if price >= 0 => {}
            Some(_) => return Err(validation("price cannot be negative")),
            None => return Err(validation("a price is required to sell")),
        },
        PostStatus::Trade => {
            if req.min_trade_value_cents.is_some_and(|v| v < 0) {
                return Err(validation("trade value cannot be negative"));
            }
        }
        PostStatus::Share => {}
    }

    let post_id = Uuid::new_v4();

    state.db.create_post(&NewPost {
        id: &post_id.to_string(),
        user_id: &claims.sub.to_string(),
        image: req.image.trim(),
        description: req.description.as_deref().map(str::trim),
        status: req.status.as_str(),
        art_type: req.art_type.as_deref(),
        price_cents: req.price_cents,
        min_trade_value_cents: req.min_trade_value_cents,
    })?;

    Ok((StatusCode::CREATED, Json(CreatePostResponse { post_id })))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Optional art-type filter; "All" or an unknown value means no
    /// filter, matching the feed's dropdown behavior.
    pub art_type: Option<String>,
}

pub async fn get_feed(
    State(state): State<Arc<AppStateInner>>,
    Query(query): Query<FeedQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .art_type
        .filter(|t| t != "All" && is_valid_art_type(t));

    // Run the blocking feed query off the async runtime
    let db = state.clone();
    let viewer_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.feed(&viewer_id, filter.as_deref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            internal("feed query task failed")
        })??;

    let posts: Vec<FeedPost> = rows
        .into_iter()
        .map(|row| FeedPost {
            id: parse_uuid("post id", &row.post.id),
            author_id: parse_uuid("post user_id", &row.post.user_id),
            author_username: row.author_username,
            author_photo: row.author_photo,
            image: row.post.image,
            description: row.post.description,
            status: row.post.status,
            art_type: row.post.art_type,
            price_cents: row.post.price_cents,
            min_trade_value_cents: row.post.min_trade_value_cents,
            sold: row.post.sold,
            like_count: row.like_count,
            comment_count: row.comment_count,
            liked_by_me: row.viewer_liked,
            created_at: row.post.created_at,
        })
        .collect();

    Ok(Json(posts))
}
