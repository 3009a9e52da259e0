use std::env;

use anyhow::Result;
use tracing::warn;

use crate::history::DEFAULT_CAPACITY;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars, never from flags that end up in shell
/// history. The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Backend REST API base URL (SCOUT_API_URL).
    pub api_url: String,
    /// Static bearer token (SCOUT_API_TOKEN). A stored login session
    /// takes precedence.
    pub api_token: Option<String>,
    /// Password used by `scout login` when `--password` is not given.
    pub password: Option<String>,
    pub db_path: String,
    /// Number of searches kept in history (SCOUT_HISTORY_CAPACITY).
    pub history_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default, so `init` and `status` work with no .env.
    pub fn load() -> Result<Self> {
        let history_capacity = match env::var("SCOUT_HISTORY_CAPACITY") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %raw, "Invalid SCOUT_HISTORY_CAPACITY, using default");
                    DEFAULT_CAPACITY
                }
            },
            Err(_) => DEFAULT_CAPACITY,
        };

        Ok(Self {
            api_url: env::var("SCOUT_API_URL")
                .unwrap_or_else(|_| crate::api::client::DEFAULT_API_URL.to_string()),
            api_token: non_empty("SCOUT_API_TOKEN"),
            password: non_empty("SCOUT_PASSWORD"),
            db_path: env::var("SCOUT_DB_PATH").unwrap_or_else(|_| "./scout.db".to_string()),
            history_capacity,
        })
    }

    /// Check that a password is available for `scout login`.
    pub fn require_password(&self, flag: Option<String>) -> Result<String> {
        match flag.or_else(|| self.password.clone()) {
            Some(p) if !p.is_empty() => Ok(p),
            _ => anyhow::bail!(
                "No password given. Pass --password or set SCOUT_PASSWORD in your .env file."
            ),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
