use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use connectsphere_types::api::{Claims, NotificationResponse};

use crate::auth::AppStateInner;
use crate::error::{ApiError, not_found};
use crate::parse_uuid;

pub async fn list_notifications(
    State(state): State<Arc<AppStateInner>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let notifications: Vec<NotificationResponse> = state
        .db
        .notifications_for_user(&claims.sub.to_string())?
        .into_iter()
        .map(|row| NotificationResponse {
            id: parse_uuid("notification id", &row.id),
            kind: row.kind,
            post_id: parse_uuid("notification post_id", &row.post_id),
            actor_username: row.actor_username,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(notifications))
}

pub async fn mark_read(
    State(state): State<Arc<AppStateInner>>,
    Path(notification_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .db
        .mark_notification_read(&notification_id.to_string(), &claims.sub.to_string())?;

    // Someone else's notification looks the same as a missing one.
    if !updated {
        return Err(not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
