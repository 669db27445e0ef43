//! Server configuration from environment variables.
//!
//! Every setting has a default; a missing or unparseable value falls back to it.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ASSET_ROOT: &str = "public";
pub const DEFAULT_IDLE_HOURS: u64 = 12;
pub const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 30;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// `HOST`
    pub host: String,
    /// `PORT`
    pub port: u16,
    /// `ASSET_ROOT`: directory the HTML/JS/CSS is served from.
    pub asset_root: PathBuf,
    /// `DRAFT_IDLE_HOURS`: drafts untouched this long are dropped.
    pub inactivity_timeout: Duration,
    /// `CLEANUP_INTERVAL_MINUTES`: how often idle drafts are swept.
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            inactivity_timeout: Duration::from_secs(DEFAULT_IDLE_HOURS * 3600),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_MINUTES * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let asset_root = lookup("ASSET_ROOT")
            .filter(|r| !r.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.asset_root);
        let inactivity_timeout = lookup("DRAFT_IDLE_HOURS")
            .and_then(|h| h.trim().parse::<u64>().ok())
            .filter(|h| *h > 0)
            .map(|h| Duration::from_secs(h * 3600))
            .unwrap_or(defaults.inactivity_timeout);
        let cleanup_interval = lookup("CLEANUP_INTERVAL_MINUTES")
            .and_then(|m| m.trim().parse::<u64>().ok())
            .filter(|m| *m > 0)
            .map(|m| Duration::from_secs(m * 60))
            .unwrap_or(defaults.cleanup_interval);
        Self {
            host,
            port,
            asset_root,
            inactivity_timeout,
            cleanup_interval,
        }
    }
}
