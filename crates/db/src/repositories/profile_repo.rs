//! Repository for the `profiles` table.

use loyalty_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::profile::{CreateProfile, Profile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, role, store_id, total_points, created_at";

/// Provides profile lookups and the running points total.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile with zero points.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (full_name, email, role, store_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.store_id)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Atomically add `points` to a user's running total.
    ///
    /// Returns the new total, or `None` if the profile does not exist. The
    /// row lock taken by the update serializes concurrent awards per user.
    pub async fn add_points<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        points: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE profiles SET total_points = total_points + $2
             WHERE id = $1
             RETURNING total_points",
        )
        .bind(user_id)
        .bind(points)
        .fetch_optional(executor)
        .await
    }
}
