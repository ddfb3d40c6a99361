//! Server configuration from environment variables
//!
//! - `PORT`: listen port, default 3000 (unparsable values fall back to the default)
//! - `ESTIMATOR_SEED`: optional u64 making confidence scores reproducible
//! - `RUST_LOG`: tracing filter, read by the binary's subscriber

use anyhow::{anyhow, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "yield_estimator=info,tower_http=debug,axum=debug,warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // A bad seed is an error rather than a silent switch to entropy
        let seed = match lookup("ESTIMATOR_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|e| anyhow!("Invalid ESTIMATOR_SEED '{}': {}", raw, e))?,
            ),
            None => None,
        };

        Ok(Self { port, seed })
    }
}
