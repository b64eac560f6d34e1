//! Handlers for campaign leaderboards and store performance.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use loyalty_core::types::DbId;
use serde::Deserialize;

use crate::engine::leaderboard;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /leaderboard`.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub campaign_id: DbId,
    pub store_id: Option<DbId>,
}

/// GET /api/v1/leaderboard?campaign_id=&store_id=
pub async fn get_leaderboard(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<impl IntoResponse> {
    let entries = leaderboard::ranked(&state.pool, params.campaign_id, params.store_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/store-performance
pub async fn get_store_performance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = leaderboard::store_performance(&state.pool, Utc::now()).await?;
    Ok(Json(DataResponse { data: rows }))
}
