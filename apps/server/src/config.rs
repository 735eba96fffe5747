use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub store_timeout: Duration,
    /// Raw `KP_SECRET_KEY`; decoded by [`crate::auth::decode_secret_key`].
    pub secret_key: String,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("KP_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:4000".to_string())
            .parse()
            .context("Invalid KP_LISTEN_ADDR")?;
        let db_path = std::env::var("KP_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("KP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = env_u64("KP_REQUEST_TIMEOUT_MS", 30_000);
        let store_timeout_ms = env_u64("KP_STORE_TIMEOUT_MS", 5_000);
        let secret_key =
            std::env::var("KP_SECRET_KEY").context("KP_SECRET_KEY must be set")?;
        let token_ttl_secs = env_u64("KP_TOKEN_TTL_SECS", 86_400);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            store_timeout: Duration::from_millis(store_timeout_ms),
            secret_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
