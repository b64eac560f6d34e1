//! Store entity model and DTOs.

use loyalty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub cnpj: String,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub cnpj: String,
    pub location: Option<String>,
    pub logo_url: Option<String>,
}

/// DTO for updating an existing store. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub cnpj: Option<String>,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}
