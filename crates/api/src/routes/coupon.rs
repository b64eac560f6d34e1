//! Route definitions for the `/coupons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::coupon;
use crate::state::AppState;

/// Routes mounted at `/coupons`.
///
/// ```text
/// GET    /              -> list_coupons
/// POST   /              -> submit_coupon
/// GET    /{id}          -> get_coupon
/// POST   /{id}/review   -> review_coupon (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(coupon::list_coupons).post(coupon::submit_coupon))
        .route("/{id}", get(coupon::get_coupon))
        .route("/{id}/review", post(coupon::review_coupon))
}
