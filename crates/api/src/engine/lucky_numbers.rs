//! Lucky-number issuance.

use loyalty_core::error::CoreError;
use loyalty_core::types::DbId;
use loyalty_db::models::lucky_number::LuckyNumber;
use loyalty_db::repositories::{CampaignRepo, LuckyNumberRepo};
use sqlx::PgConnection;

use crate::error::AppResult;

/// Issue `count` consecutive tickets to a user.
///
/// Numbers come from the campaign's counter, which is bumped in place so
/// concurrent issuance for one campaign serializes on the campaign row and
/// never hands out a number twice. Must run inside the caller's transaction.
pub async fn issue(
    conn: &mut PgConnection,
    user_id: DbId,
    campaign_id: DbId,
    count: i32,
    goal_completion_id: Option<DbId>,
) -> AppResult<Vec<LuckyNumber>> {
    if count < 1 {
        return Err(
            CoreError::Validation(format!("Ticket count must be positive, got {count}")).into(),
        );
    }

    let first = CampaignRepo::reserve_lucky_numbers(&mut *conn, campaign_id, count)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        })?;

    let tickets = LuckyNumberRepo::insert_range(
        &mut *conn,
        user_id,
        campaign_id,
        goal_completion_id,
        first,
        count,
    )
    .await?;

    tracing::info!(
        user_id,
        campaign_id,
        first_number = first,
        count,
        "Lucky numbers issued"
    );

    Ok(tickets)
}
