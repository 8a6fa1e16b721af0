//! Test utilities for Banquet services.
//!
//! Import from `[dev-dependencies]` only, never from production code.

pub mod auth;
pub mod memory;
