use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_AUTH_API_URL: &str = "http://localhost:5000";
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SEARCH_DELAY_MS: u64 = 500;

/// Where session tokens are kept between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreKind {
    /// JSON file on disk, survives restarts
    File(PathBuf),
    /// Process memory only
    Memory,
    /// Nothing is stored; every read returns nothing
    Disabled,
}

impl SessionStoreKind {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "memory" => SessionStoreKind::Memory,
            "none" | "off" => SessionStoreKind::Disabled,
            path => SessionStoreKind::File(PathBuf::from(path)),
        }
    }
}

/// Client configuration loaded from environment variables.
///
/// | Env Var             | Default                  |
/// |---------------------|--------------------------|
/// | `API_URL`           | `http://127.0.0.1:8000`  |
/// | `AUTH_API_URL`      | `http://localhost:5000`  |
/// | `READ_TIMEOUT_SECS` | `10`                     |
/// | `SESSION_STORE`     | `memory`                 |
/// | `SIMULATED_LATENCY` | `true`                   |
/// | `SEARCH_DELAY_MS`   | `500`                    |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    /// Applied to the listing, hotel and host reads only
    pub read_timeout: Duration,
    pub session_store: SessionStoreKind,
    pub simulated_latency: bool,
    pub search_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_API_URL.to_string(),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            session_store: SessionStoreKind::Memory,
            simulated_latency: true,
            search_delay: Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("API_URL")
            .map(|v| trim_base_url(&v))
            .unwrap_or(defaults.api_base_url);
        let auth_base_url = lookup("AUTH_API_URL")
            .map(|v| trim_base_url(&v))
            .unwrap_or(defaults.auth_base_url);

        let read_timeout = match lookup("READ_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .with_context(|| format!("READ_TIMEOUT_SECS must be a whole number, got {v:?}"))?,
            ),
            None => defaults.read_timeout,
        };

        let search_delay = match lookup("SEARCH_DELAY_MS") {
            Some(v) => Duration::from_millis(
                v.trim()
                    .parse()
                    .with_context(|| format!("SEARCH_DELAY_MS must be a whole number, got {v:?}"))?,
            ),
            None => defaults.search_delay,
        };

        let simulated_latency = match lookup("SIMULATED_LATENCY") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("SIMULATED_LATENCY must be true or false, got {v:?}"))?,
            None => defaults.simulated_latency,
        };

        let session_store = lookup("SESSION_STORE")
            .map(|v| SessionStoreKind::parse(&v))
            .unwrap_or(defaults.session_store);

        Ok(Self {
            api_base_url,
            auth_base_url,
            read_timeout,
            session_store,
            simulated_latency,
            search_delay,
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
