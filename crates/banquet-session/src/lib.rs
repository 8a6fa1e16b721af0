//! Per-application user sessions stored as Redis hashes.
//!
//! Provides the `Session` model and its hash codec, the `SessionStore` port
//! with a Redis implementation, and the `SessionToken` request extractor.

pub mod error;
pub mod session;
pub mod store;
pub mod token;

pub use error::SessionError;
pub use session::{Session, SessionPatch};
pub use store::{RedisSessionStore, SessionStore};
pub use token::SessionToken;
