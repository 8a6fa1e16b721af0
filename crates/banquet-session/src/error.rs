/// Session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session field `{0}` is required for a new session")]
    MissingField(&'static str),
    #[error("corrupt session field `{field}`: {reason}")]
    Corrupt { field: &'static str, reason: String },
    #[error("redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),
    #[error("redis error: {0}")]
    Redis(#[from] deadpool_redis::redis::RedisError),
}
