//! Gamification settlement engine.
//!
//! Every write path runs inside one database transaction and returns the
//! notifications it wants sent; those are handed to the
//! [`NotificationEmitter`](loyalty_events::NotificationEmitter) only after
//! the commit succeeded.
//!
//! - [`ledger`] -- coupon submission and the review settlement.
//! - [`goals`] -- period progress and idempotent goal completion.
//! - [`lucky_numbers`] -- collision-free ticket issuance.
//! - [`draw`] -- the fair prize draw.
//! - [`leaderboard`] -- the ranked read model.
//!
//! Row locks are always taken in the order coupon, profile, campaign, so
//! reviews and draws touching the same campaign cannot deadlock.

pub mod draw;
pub mod goals;
pub mod leaderboard;
pub mod ledger;
pub mod lucky_numbers;
