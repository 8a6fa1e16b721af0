#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use chrono::{Duration, Utc};
use deadpool_redis::Pool;
use deadpool_redis::redis::{self, AsyncCommands};

use crate::error::SessionError;
use crate::session::{Session, SessionPatch, new_session_id};

/// Port for issuing, refreshing, reading and dropping sessions.
pub trait SessionStore: Send + Sync {
    /// Create (`id == None`) or refresh a session, merging `patch` over the
    /// stored fields and pushing `expire_at` to `now + ttl`.
    async fn update(&self, id: Option<&str>, patch: SessionPatch)
    -> Result<Session, SessionError>;

    /// `None` if no session is stored under `id`.
    async fn find(&self, id: &str) -> Result<Option<Session>, SessionError>;

    /// Delete the session and return what was stored, if anything.
    async fn remove(&self, id: &str) -> Result<Option<Session>, SessionError>;
}

/// Redis key of a session hash.
pub fn session_key(app: &str, id: &str) -> String {
    format!("USER_SESSION:{app}:{id}")
}

/// Sessions stored as Redis hashes with a key TTL equal to the session TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
    /// Application namespace; sessions of different apps never collide.
    pub app: String,
    pub ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(pool: Pool, app: impl Into<String>, ttl: Duration) -> Self {
        Self {
            pool,
            app: app.into(),
            ttl,
        }
    }
}

impl SessionStore for RedisSessionStore {
    async fn update(
        &self,
        id: Option<&str>,
        patch: SessionPatch,
    ) -> Result<Session, SessionError> {
        let id = id.map(str::to_owned).unwrap_or_else(new_session_id);
        let key = session_key(&self.app, &id);
        let mut conn = self.pool.get().await?;

        let stored: HashMap<String, String> = conn.hgetall(&key).await?;
        let existing = Session::from_fields(stored)?;
        let session = Session::apply(existing, id, patch, Utc::now(), self.ttl)?;

        let () = redis::pipe()
            .atomic()
            .hset_multiple(&key, &session.to_fields())
            .ignore()
            .expire(&key, self.ttl.num_seconds())
            .ignore()
            .query_async(&mut conn)
            .await?;

        tracing::debug!(app = %self.app, user_id = %session.user_id, "session updated");
        Ok(session)
    }

    async fn find(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let mut conn = self.pool.get().await?;
        let stored: HashMap<String, String> = conn.hgetall(session_key(&self.app, id)).await?;
        Session::from_fields(stored)
    }

    async fn remove(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let key = session_key(&self.app, id);
        let mut conn = self.pool.get().await?;
        let (stored,): (HashMap<String, String>,) = redis::pipe()
            .atomic()
            .hgetall(&key)
            .del(&key)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Session::from_fields(stored)
    }
}
