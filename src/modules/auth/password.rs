//! bcrypt hashing, moved off the async executor.

use anyhow::{anyhow, Context, Result};

pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task failed")?
        .map_err(|e| anyhow!("failed to hash password: {e}"))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .map_err(|e| anyhow!("failed to verify password: {e}"))
}
