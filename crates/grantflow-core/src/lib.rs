//! Core types shared across grantflow crates.
//!
//! This crate holds the strongly typed identifiers used by every other
//! crate in the workspace. It deliberately has no heavyweight
//! dependencies so that any crate can depend on it.

pub mod ids;

pub use ids::{ApplicationId, GrantId, ParseIdError, UserId};
