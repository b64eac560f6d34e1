//! Prize draw over a campaign's undrawn tickets.

use loyalty_core::channels::CHANNEL_BOTH;
use loyalty_core::draw::{select_winners, validate_winner_count};
use loyalty_core::error::CoreError;
use loyalty_core::notification::{draw_winner, NotificationMessage};
use loyalty_core::types::DbId;
use loyalty_db::models::lucky_number::LuckyNumber;
use loyalty_db::repositories::{CampaignRepo, LuckyNumberRepo};
use loyalty_db::DbPool;
use loyalty_events::NotificationEmitter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::AppResult;

/// Result of a completed draw.
#[derive(Debug, Serialize)]
pub struct DrawOutcome {
    pub campaign_id: DbId,
    pub requested: i64,
    /// Size of the eligible pool before this draw.
    pub eligible_count: usize,
    /// Winning tickets, ordered by number.
    pub winners: Vec<LuckyNumber>,
}

/// Draw up to `winner_count` winners with an OS-seeded generator.
pub async fn execute(
    pool: &DbPool,
    emitter: &NotificationEmitter,
    campaign_id: DbId,
    winner_count: i64,
) -> AppResult<DrawOutcome> {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    execute_with_rng(pool, emitter, campaign_id, winner_count, &mut rng).await
}

/// Draw up to `winner_count` winners using `rng`.
///
/// The campaign row is locked for the whole read-shuffle-mark sequence, so
/// two concurrent draws never pick the same ticket. An empty pool fails
/// with [`CoreError::InsufficientPool`] and sends no notifications; a pool
/// smaller than `winner_count` caps the result. Winners are notified in-app
/// and by email.
pub async fn execute_with_rng<R: Rng + Send>(
    pool: &DbPool,
    emitter: &NotificationEmitter,
    campaign_id: DbId,
    winner_count: i64,
    rng: &mut R,
) -> AppResult<DrawOutcome> {
    let count = validate_winner_count(winner_count)?;

    let mut tx = pool.begin().await?;

    CampaignRepo::lock(&mut *tx, campaign_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        })?;

    let eligible = LuckyNumberRepo::list_eligible(&mut *tx, campaign_id).await?;
    let eligible_count = eligible.len();
    let picked = select_winners(eligible, count, rng)?;
    let ids: Vec<DbId> = picked.iter().map(|t| t.id).collect();

    let winners = LuckyNumberRepo::mark_winners(&mut *tx, &ids).await?;
    if winners.len() != ids.len() {
        return Err(CoreError::Conflict(
            "Some selected tickets were drawn concurrently; no winners were recorded".into(),
        )
        .into());
    }

    tx.commit().await?;

    tracing::info!(
        campaign_id,
        requested = winner_count,
        eligible_count,
        winners = winners.len(),
        "Draw executed"
    );

    let notifications: Vec<NotificationMessage> = winners
        .iter()
        .map(|t| draw_winner(t.user_id, campaign_id, t.id, t.number).with_channel(CHANNEL_BOTH))
        .collect();
    emitter.emit_all(&notifications).await;

    Ok(DrawOutcome {
        campaign_id,
        requested: winner_count,
        eligible_count,
        winners,
    })
}
