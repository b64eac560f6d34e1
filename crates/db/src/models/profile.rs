//! User profile model.
//!
//! Profiles are provisioned alongside identity-provider accounts; the
//! settlement engine only ever increments `total_points`.

use loyalty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub store_id: Option<DbId>,
    pub total_points: i64,
    pub created_at: Timestamp,
}

/// DTO for provisioning a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub store_id: Option<DbId>,
}
