//! Repository for the `campaigns` table.

use loyalty_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, start_date, end_date, is_active, banner_url, \
    keywords, settings, last_lucky_number, created_at, updated_at";

/// Result of [`CampaignRepo::delete_unsettled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignDeletion {
    Deleted,
    NotFound,
    /// The campaign has approved coupons or issued tickets.
    HasSettlements,
}

/// Provides CRUD operations for campaigns and the lucky-number counter.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    ///
    /// If `is_active` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns
                (title, description, start_date, end_date, is_active, banner_url, keywords, settings)
             VALUES ($1, $2, $3, $4, COALESCE($5, true), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_active)
            .bind(&input.banner_url)
            .bind(&input.keywords)
            .bind(Json(&input.settings))
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a campaign and take a row lock on it for the rest of the
    /// transaction. Draws hold this lock while they read and mark the pool.
    pub async fn lock<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all campaigns, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// Update a campaign. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                is_active = COALESCE($6, is_active),
                banner_url = COALESCE($7, banner_url),
                keywords = COALESCE($8, keywords),
                settings = COALESCE($9, settings),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_active)
            .bind(&input.banner_url)
            .bind(&input.keywords)
            .bind(input.settings.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign that has not settled anything yet.
    ///
    /// Approved coupons and issued tickets are part of users' reward
    /// history, so a campaign holding any of them is kept. The campaign's
    /// coupons are locked before the campaign row, the same order reviews
    /// take them in.
    pub async fn delete_unsettled(
        pool: &PgPool,
        id: DbId,
    ) -> Result<CampaignDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM coupons WHERE campaign_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let (exists, settled): (bool, bool) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM campaigns WHERE id = $1),
                    EXISTS (SELECT 1 FROM coupons WHERE campaign_id = $1 AND status = 'approved')
                    OR EXISTS (SELECT 1 FROM lucky_numbers WHERE campaign_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = if !exists {
            CampaignDeletion::NotFound
        } else if settled {
            CampaignDeletion::HasSettlements
        } else {
            sqlx::query("DELETE FROM campaigns WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            CampaignDeletion::Deleted
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Reserve `count` consecutive ticket numbers for a campaign.
    ///
    /// Increments the campaign's counter in place and returns the first
    /// reserved number, or `None` if the campaign does not exist. The row
    /// lock taken by the update serializes concurrent issuance, and numbers
    /// are never handed out twice.
    pub async fn reserve_lucky_numbers<'e>(
        executor: impl PgExecutor<'e>,
        campaign_id: DbId,
        count: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE campaigns SET last_lucky_number = last_lucky_number + $2
             WHERE id = $1
             RETURNING last_lucky_number - $2 + 1",
        )
        .bind(campaign_id)
        .bind(count)
        .fetch_optional(executor)
        .await
    }
}
