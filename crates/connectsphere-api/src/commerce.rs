use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use connectsphere_db::actions::ShippingAddress;
use connectsphere_types::api::{
    BidAddressRequest, BidAddressResponse, CheckoutRequest, CheckoutResponse, Claims,
};

use crate::auth::AppStateInner;
use crate::error::ApiError;

/// Buyer submits a shipping address, which finalizes the sale: the
/// order row, the sold flag, and the seller's notification land in one
/// transaction.
pub async fn checkout(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order_id = Uuid::new_v4();

    state.db.submit_checkout_address(
        &order_id.to_string(),
        &post_id.to_string(),
        &claims.sub.to_string(),
        &claims.username,
        &ShippingAddress {
            street: &req.street,
            city: &req.city,
            state: &req.state,
            zip_code: &req.zip_code,
            country: &req.country,
        },
    )?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order_id })))
}

/// Auction winner submits a shipping address for an already-sold post.
pub async fn submit_bid_address(
    State(state): State<Arc<AppStateInner>>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BidAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bid_address_id = Uuid::new_v4();

    state.db.submit_bid_address(
        &bid_address_id.to_string(),
        &post_id.to_string(),
        &claims.sub.to_string(),
        &claims.username,
        &req.address,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(BidAddressResponse { bid_address_id }),
    ))
}
