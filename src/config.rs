// src/config.rs
//! Service configuration: a small TOML file plus environment overrides.
//! The Telegram token never reaches the analytics core; `main` hands it to
//! the notifier at construction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::bot::{BotOptions, DEFAULT_SEARCH_LIMIT};
use crate::snapshot::DEFAULT_BRAND_LIMIT;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/watcher.toml";

pub const ENV_CONFIG_PATH: &str = "WATCHER_CONFIG_PATH";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Bot token for outbound delivery; absent means deliveries are skipped.
    pub telegram_token: Option<String>,
    /// How many brands the stability ranking keeps.
    pub rising_brands_limit: usize,
    /// How many search hits one reply lists.
    pub search_result_limit: usize,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            telegram_token: None,
            rising_brands_limit: DEFAULT_BRAND_LIMIT,
            search_result_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl WatcherConfig {
    /// Resolve configuration:
    /// 1) $WATCHER_CONFIG_PATH (must exist when set)
    /// 2) config/watcher.toml
    /// 3) built-in defaults
    /// $TELEGRAM_BOT_TOKEN always overrides the file value.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    anyhow::bail!(
                        "{ENV_CONFIG_PATH} points to a missing file: {}",
                        path.display()
                    );
                }
                Self::from_file(&path)?
            }
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(token) = std::env::var(ENV_TELEGRAM_TOKEN) {
            let token = token.trim();
            if !token.is_empty() {
                cfg.telegram_token = Some(token.to_string());
            }
        }

        Ok(cfg)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config at {}", path.display()))
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg = toml::from_str(toml_str)?;
        Ok(cfg)
    }
}

impl From<&WatcherConfig> for BotOptions {
    fn from(cfg: &WatcherConfig) -> Self {
        Self {
            search_limit: cfg.search_result_limit,
            brand_limit: cfg.rising_brands_limit,
        }
    }
}
