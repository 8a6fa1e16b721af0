use anyhow::Context as _;

use crate::error::AdminServiceError;

/// bcrypt on the blocking pool; a hash at cost 10+ takes tens of milliseconds.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AdminServiceError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("join password hasher")?
        .context("hash password")?;
    Ok(hash)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AdminServiceError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("join password verifier")?
        .context("verify password")?;
    Ok(matched)
}
