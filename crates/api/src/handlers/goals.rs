//! Handlers for goal progress.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use loyalty_core::error::CoreError;
use loyalty_core::types::DbId;
use serde::Deserialize;

use crate::engine::goals;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /goals/progress`.
#[derive(Debug, Deserialize)]
pub struct GoalProgressParams {
    pub campaign_id: DbId,
    /// Admins may inspect another user's progress.
    pub user_id: Option<DbId>,
}

/// GET /api/v1/goals/progress?campaign_id=
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GoalProgressParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = match params.user_id {
        Some(other) if other != auth.user_id && !auth.is_admin() => {
            return Err(AppError::Core(CoreError::Forbidden(
                "You can only view your own goal progress".into(),
            )));
        }
        Some(other) => other,
        None => auth.user_id,
    };

    let progress = goals::progress(&state.pool, user_id, params.campaign_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: progress }))
}
