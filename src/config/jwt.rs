use anyhow::Result;
use std::env;

/// Session token configuration. A single token kind backs the session
/// cookie; its lifetime matches the cookie's 7-day expiry.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry: u64, // seconds
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        if secret.len() < 32 {
            return Err(anyhow::anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let session_expiry = env::var("JWT_SESSION_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(604800); // 7 days

        Ok(Self {
            secret,
            session_expiry,
        })
    }
}
