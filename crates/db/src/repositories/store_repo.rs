//! Repository for the `stores` table.

use loyalty_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{CreateStore, Store, UpdateStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, cnpj, location, logo_url, is_active, created_at, updated_at";

/// Provides CRUD operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, cnpj, location, logo_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(&input.cnpj)
            .bind(&input.location)
            .bind(&input.logo_url)
            .fetch_one(pool)
            .await
    }

    /// Find a store by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stores ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores ORDER BY name ASC");
        sqlx::query_as::<_, Store>(&query).fetch_all(pool).await
    }

    /// Update a store. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStore,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET
                name = COALESCE($2, name),
                cnpj = COALESCE($3, cnpj),
                location = COALESCE($4, location),
                logo_url = COALESCE($5, logo_url),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.cnpj)
            .bind(&input.location)
            .bind(&input.logo_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a store. Profiles linked to it are detached, not removed.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
