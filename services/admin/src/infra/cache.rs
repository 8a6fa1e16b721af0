use std::sync::LazyLock;

use anyhow::Context as _;
use deadpool_redis::Pool;
use redis::{AsyncCommands, Script};

use crate::domain::repository::CaptchaCache;
use crate::error::AdminServiceError;

/// Delete KEYS[1] and its attempt counter KEYS[2] if KEYS[1] holds ARGV[1]
/// and return 1. Otherwise count the miss, expiring the counter with the
/// code, and drop both once ARGV[2] misses have been made.
static CONSUME_IF_EQUAL: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
local stored = redis.call('GET', KEYS[1])
if not stored then
    return 0
end
if stored == ARGV[1] then
    redis.call('DEL', KEYS[1], KEYS[2])
    return 1
end
local misses = redis.call('INCR', KEYS[2])
if misses == 1 then
    local ttl = redis.call('PTTL', KEYS[1])
    if ttl > 0 then
        redis.call('PEXPIRE', KEYS[2], ttl)
    end
end
if misses >= tonumber(ARGV[2]) then
    redis.call('DEL', KEYS[1], KEYS[2])
end
return 0
",
    )
});

fn attempts_key(key: &str) -> String {
    format!("{key}:ATTEMPTS")
}

#[derive(Clone)]
pub struct RedisCaptchaCache {
    pub pool: Pool,
}

impl CaptchaCache for RedisCaptchaCache {
    async fn store(&self, key: &str, code: &str, ttl_secs: u64) -> Result<(), AdminServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let () = redis::pipe()
            .atomic()
            .set_ex(key, code, ttl_secs)
            .ignore()
            .del(attempts_key(key))
            .ignore()
            .query_async(&mut conn)
            .await
            .context("store captcha")?;
        Ok(())
    }

    async fn consume(
        &self,
        key: &str,
        code: &str,
        max_attempts: u32,
    ) -> Result<bool, AdminServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let deleted: i64 = CONSUME_IF_EQUAL
            .key(key)
            .key(attempts_key(key))
            .arg(code)
            .arg(max_attempts)
            .invoke_async(&mut conn)
            .await
            .context("consume captcha")?;
        Ok(deleted == 1)
    }

    async fn remove(&self, key: &str) -> Result<(), AdminServiceError> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let _: i64 = conn
            .del(vec![key.to_owned(), attempts_key(key)])
            .await
            .context("remove captcha")?;
        Ok(())
    }
}
