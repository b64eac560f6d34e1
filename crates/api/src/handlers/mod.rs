pub mod campaign;
pub mod coupon;
pub mod draw;
pub mod goals;
pub mod leaderboard;
pub mod lucky_number;
pub mod notification;
pub mod store;
