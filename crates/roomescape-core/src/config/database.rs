//! Database settings for the operator CLI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the reservation store lives and how many connections one CLI run may hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections. A single command needs very few.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Seconds to wait for a free connection before failing the command.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Acquire timeout as a `Duration`.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

fn default_pool_size() -> u32 {
    4
}

fn default_acquire_timeout() -> u64 {
    5
}
