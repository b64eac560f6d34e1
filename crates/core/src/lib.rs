//! Domain logic for the receipt-rewards platform.
//!
//! This crate has zero internal dependencies so the settlement rules can be
//! used by the repository layer, the HTTP layer and tests alike.

pub mod campaign;
pub mod channels;
pub mod coupon;
pub mod draw;
pub mod error;
pub mod goals;
pub mod leaderboard;
pub mod notification;
pub mod roles;
pub mod types;
