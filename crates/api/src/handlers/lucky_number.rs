//! Handlers for the `/lucky-numbers` resource.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use loyalty_db::repositories::LuckyNumberRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::CampaignFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lucky-numbers
///
/// Users see their own tickets; admins see every ticket.
pub async fn list_lucky_numbers(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CampaignFilterParams>,
) -> AppResult<impl IntoResponse> {
    let tickets =
        LuckyNumberRepo::list(&state.pool, auth.owner_filter(), params.campaign_id).await?;
    Ok(Json(DataResponse { data: tickets }))
}
