use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use connectsphere_types::api::{
    AddCommentRequest, Claims, CommentResponse, LikersResponse, ToggleLikeResponse,
};

use crate::auth::AppStateInner;
use crate::error::{ApiError, not_found};
use crate::parse_uuid;

pub async fn toggle_like(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let like_id = Uuid::new_v4();

    let liked = state.db.toggle_like(
        &like_id.to_string(),
        &post_id.to_string(),
        &claims.sub.to_string(),
        &claims.username,
    )?;

    Ok(Json(ToggleLikeResponse { liked }))
}

pub async fn add_comment(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment_id = Uuid::new_v4();

    state.db.add_comment(
        &comment_id.to_string(),
        &post_id.to_string(),
        &claims.sub.to_string(),
        &claims.username,
        &req.body,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": comment_id })),
    ))
}

pub async fn list_comments(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = post_id.to_string();
    if state.db.get_post(&post_id)?.is_none() {
        return Err(not_found());
    }

    let comments: Vec<CommentResponse> = state
        .db
        .comments_for_post(&post_id)?
        .into_iter()
        .map(|row| CommentResponse {
            id: parse_uuid("comment id", &row.id),
            author_username: row.author_username,
            author_photo: row.author_photo,
            body: row.body,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(comments))
}

pub async fn list_likers(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = post_id.to_string();
    if state.db.get_post(&post_id)?.is_none() {
        return Err(not_found());
    }

    let usernames = state.db.likers_for_post(&post_id)?;
    Ok(Json(LikersResponse { usernames }))
}
