//! Handlers for the `/coupons` resource: submission, listing and review.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loyalty_core::coupon::{CouponStatus, ReviewDecision};
use loyalty_core::error::CoreError;
use loyalty_core::types::DbId;
use loyalty_db::models::coupon::{CouponFilter, ReviewCouponRequest, SubmitCouponRequest};
use loyalty_db::repositories::CouponRepo;
use serde::Deserialize;

use crate::engine::ledger;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /coupons`.
#[derive(Debug, Deserialize)]
pub struct CouponListParams {
    pub campaign_id: Option<DbId>,
    /// One of `pending`, `approved`, `rejected`.
    pub status: Option<String>,
}

/// GET /api/v1/coupons
///
/// Admins see every coupon (the review queue); everyone else sees their own.
pub async fn list_coupons(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CouponListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        CouponStatus::parse(status)?;
    }

    let filter = CouponFilter {
        user_id: auth.owner_filter(),
        campaign_id: params.campaign_id,
        status: params.status,
    };
    let coupons = CouponRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = coupons.len(), user_id = auth.user_id, "Listed coupons");
    Ok(Json(DataResponse { data: coupons }))
}

/// GET /api/v1/coupons/{id}
pub async fn get_coupon(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let coupon = CouponRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Coupon",
            id,
        }))?;

    if !auth.is_admin() && coupon.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own coupons".into(),
        )));
    }

    Ok(Json(DataResponse { data: coupon }))
}

/// POST /api/v1/coupons
pub async fn submit_coupon(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitCouponRequest>,
) -> AppResult<impl IntoResponse> {
    let coupon = ledger::submit(&state.pool, auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: coupon })))
}

/// POST /api/v1/coupons/{id}/review
///
/// Settles the review and returns the reviewed coupon together with the
/// owner's new total and anything the review unlocked.
pub async fn review_coupon(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewCouponRequest>,
) -> AppResult<impl IntoResponse> {
    let decision = ReviewDecision::parse(&input.status)?;
    let outcome = ledger::review(
        &state.pool,
        &state.emitter,
        id,
        admin.user_id,
        decision,
        input.points_awarded,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}
