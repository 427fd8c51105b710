use agentlens_timeline::TimelineConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8420";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Application config loaded from `agentlens.toml`.
///
/// Every field has a serde default so a partial file (or none at all) works.
/// `AGENTLENS_SERVER` overrides the configured URL at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            timeline: TimelineConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("agentlens"))
}

/// Load config from `~/.config/agentlens/agentlens.toml`, falling back to
/// `./agentlens.toml`, then to defaults. `AGENTLENS_SERVER` wins over both.
pub fn load_config() -> AppConfig {
    let mut config = read_config_file().unwrap_or_default();
    if let Ok(url) = std::env::var("AGENTLENS_SERVER") {
        let url = url.trim();
        if !url.is_empty() {
            config.server.url = url.to_string();
        }
    }
    config
}

fn read_config_file() -> Option<AppConfig> {
    let mut candidates = Vec::new();
    if let Ok(dir) = config_dir() {
        candidates.push(dir.join("agentlens.toml"));
    }
    candidates.push(PathBuf::from("agentlens.toml"));

    for path in candidates {
        if path.exists() {
            return std::fs::read_to_string(&path)
                .ok()
                .and_then(|s| toml::from_str(&s).ok());
        }
    }
    None
}
