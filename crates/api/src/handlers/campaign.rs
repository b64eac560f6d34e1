//! Handlers for the `/campaigns` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loyalty_core::campaign::{validate_campaign, validate_settings};
use loyalty_core::error::CoreError;
use loyalty_core::types::DbId;
use loyalty_db::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use loyalty_db::repositories::{CampaignDeletion, CampaignRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_campaign_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        })
    })
}

/// GET /api/v1/campaigns
pub async fn list_campaigns(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    tracing::debug!(count = campaigns.len(), "Listed campaigns");
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = ensure_campaign_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: campaign }))
}

/// POST /api/v1/campaigns
///
/// Title, date window and goal settings are validated before the insert, so
/// the goal evaluator never sees an invalid goal.
pub async fn create_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    validate_campaign(&input.title, input.start_date, input.end_date)
        .map_err(CoreError::Validation)?;
    validate_settings(&input.settings).map_err(CoreError::Validation)?;

    let campaign = CampaignRepo::create(&state.pool, &input).await?;
    tracing::info!(
        campaign_id = campaign.id,
        title = %campaign.title,
        admin_id = admin.user_id,
        "Campaign created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// PUT /api/v1/campaigns/{id}
///
/// Partial update. The merged title and window are validated against the
/// stored row; replaced settings are validated as a whole.
pub async fn update_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_campaign_exists(&state.pool, id).await?;

    validate_campaign(
        input.title.as_deref().unwrap_or(&existing.title),
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.unwrap_or(existing.end_date),
    )
    .map_err(CoreError::Validation)?;
    if let Some(settings) = &input.settings {
        validate_settings(settings).map_err(CoreError::Validation)?;
    }

    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    tracing::info!(campaign_id = id, admin_id = admin.user_id, "Campaign updated");
    Ok(Json(DataResponse { data: campaign }))
}

/// DELETE /api/v1/campaigns/{id}
///
/// Only campaigns without approved coupons or issued tickets can be deleted;
/// others answer 409 and should be deactivated instead.
pub async fn delete_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    match CampaignRepo::delete_unsettled(&state.pool, id).await? {
        CampaignDeletion::Deleted => {
            tracing::info!(campaign_id = id, admin_id = admin.user_id, "Campaign deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        CampaignDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        })),
        CampaignDeletion::HasSettlements => Err(AppError::Core(CoreError::Conflict(format!(
            "Campaign {id} has settled coupons or tickets; deactivate it instead"
        )))),
    }
}
