//! Shared plumbing for Banquet services: errors, config, tracing, HTTP
//! middleware, serde helpers and sea-orm extensions.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
