//! Handler for executing prize draws.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use loyalty_core::types::DbId;
use serde::Deserialize;

use crate::engine::draw;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /draws`.
#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    pub campaign_id: DbId,
    /// Number of winners to draw. Defaults to 1.
    #[serde(default = "default_draw_count")]
    pub draw_count: i64,
}

fn default_draw_count() -> i64 {
    1
}

/// POST /api/v1/draws
pub async fn execute_draw(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<DrawRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(
        campaign_id = input.campaign_id,
        draw_count = input.draw_count,
        admin_id = admin.user_id,
        "Draw requested"
    );
    let outcome = draw::execute(
        &state.pool,
        &state.emitter,
        input.campaign_id,
        input.draw_count,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}
