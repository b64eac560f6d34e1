//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation (and generation, used by tooling and
//!   tests) for tokens issued by the identity provider.

pub mod jwt;
