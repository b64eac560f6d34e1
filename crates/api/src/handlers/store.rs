//! Handlers for the `/stores` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use loyalty_core::error::CoreError;
use loyalty_core::types::DbId;
use loyalty_db::models::store::{CreateStore, UpdateStore};
use loyalty_db::repositories::StoreRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_store_fields(name: Option<&str>, cnpj: Option<&str>) -> Result<(), CoreError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(CoreError::Validation("Store name is required".into()));
    }
    if cnpj.is_some_and(|c| c.trim().is_empty()) {
        return Err(CoreError::Validation("Store cnpj is required".into()));
    }
    Ok(())
}

fn store_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Store",
        id,
    })
}

/// GET /api/v1/stores
pub async fn list_stores(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stores = StoreRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: stores }))
}

/// POST /api/v1/stores
///
/// A duplicate CNPJ violates `uq_stores_cnpj` and surfaces as 409.
pub async fn create_store(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStore>,
) -> AppResult<impl IntoResponse> {
    validate_store_fields(Some(&input.name), Some(&input.cnpj))?;

    let store = StoreRepo::create(&state.pool, &input).await?;
    tracing::info!(store_id = store.id, admin_id = admin.user_id, "Store created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: store })))
}

/// GET /api/v1/stores/{id}
pub async fn get_store(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let store = StoreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| store_not_found(id))?;
    Ok(Json(DataResponse { data: store }))
}

/// PATCH /api/v1/stores/{id}
pub async fn update_store(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStore>,
) -> AppResult<impl IntoResponse> {
    validate_store_fields(input.name.as_deref(), input.cnpj.as_deref())?;

    let store = StoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| store_not_found(id))?;
    tracing::info!(store_id = id, admin_id = admin.user_id, "Store updated");
    Ok(Json(DataResponse { data: store }))
}

/// DELETE /api/v1/stores/{id}
///
/// Members of the store keep their profiles and points; they are detached
/// from the store.
pub async fn delete_store(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StoreRepo::delete(&state.pool, id).await? {
        tracing::info!(store_id = id, admin_id = admin.user_id, "Store deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(store_not_found(id))
    }
}
