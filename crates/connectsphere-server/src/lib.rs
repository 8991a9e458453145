use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use connectsphere_api::auth::{self, AppState};
use connectsphere_api::middleware::require_auth;
use connectsphere_api::{commerce, interactions, notifications, posts, profiles};

/// Assemble the full router: public auth endpoints plus the
/// session-guarded application surface.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/posts", get(posts::get_feed))
        .route("/posts", post(posts::create_post))
        .route("/posts/{post_id}/like", post(interactions::toggle_like))
        .route("/posts/{post_id}/likes", get(interactions::list_likers))
        .route("/posts/{post_id}/comments", get(interactions::list_comments))
        .route("/posts/{post_id}/comments", post(interactions::add_comment))
        .route("/posts/{post_id}/checkout", post(commerce::checkout))
        .route(
            "/posts/{post_id}/bid-address",
            post(commerce::submit_bid_address),
        )
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/{notification_id}/read",
            post(notifications::mark_read),
        )
        .route("/users/{username}", get(profiles::view_profile))
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
