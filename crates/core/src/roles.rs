//! Well-known role name constants.
//!
//! These must match the `role` values issued by the identity provider and
//! stored in `profiles.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
