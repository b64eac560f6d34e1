//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Read-only listings take `&PgPool`; anything used inside a settlement
//! transaction takes a [`sqlx::PgExecutor`].

pub mod campaign_repo;
pub mod coupon_repo;
pub mod goal_completion_repo;
pub mod leaderboard_repo;
pub mod lucky_number_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod store_repo;

pub use campaign_repo::{CampaignDeletion, CampaignRepo};
pub use coupon_repo::CouponRepo;
pub use goal_completion_repo::GoalCompletionRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use lucky_number_repo::LuckyNumberRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use store_repo::StoreRepo;
