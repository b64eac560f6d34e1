//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Request bodies for the endpoints that act on the entity

pub mod campaign;
pub mod coupon;
pub mod goal_completion;
pub mod leaderboard;
pub mod lucky_number;
pub mod notification;
pub mod profile;
pub mod store;
