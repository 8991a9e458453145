use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PostStatus;

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth handlers.
/// Canonical definition lives here in connectsphere-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Posts --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub art_type: Option<String>,
    /// Asking price in cents; required when status is `sell`.
    #[serde(default)]
    pub price_cents: Option<i64>,
    /// Minimum acceptable trade value in cents, for `trade` listings.
    #[serde(default)]
    pub min_trade_value_cents: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub post_id: Uuid,
}

/// One feed entry: the post plus its interaction counts and whether the
/// requesting user has liked it.
#[derive(Debug, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub author_photo: Option<String>,
    pub image: String,
    pub description: Option<String>,
    pub status: String,
    pub art_type: Option<String>,
    pub price_cents: Option<i64>,
    pub min_trade_value_cents: Option<i64>,
    pub sold: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_me: bool,
    pub created_at: String,
}

// -- Likes / Comments --

#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddCommentRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_username: String,
    pub author_photo: Option<String>,
    pub body: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct LikersResponse {
    pub usernames: Vec<String>,
}

// -- Checkout / bid addresses --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BidAddressRequest {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct BidAddressResponse {
    pub bid_address_id: Uuid,
}

// -- Notifications --

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: String,
    pub post_id: Uuid,
    pub actor_username: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

// -- Profiles --

#[derive(Debug, Serialize)]
pub struct ProfilePost {
    pub id: Uuid,
    pub image: String,
    pub description: Option<String>,
    pub status: String,
    pub price_cents: Option<i64>,
    pub min_trade_value_cents: Option<i64>,
    pub sold: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub posts: Vec<ProfilePost>,
}
