//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default orphanage API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3333/";

/// Default tile source, templated with `{z}/{x}/{y}` and an access token
pub const DEFAULT_MAP_TILE_URL: &str =
    "https://api.mapbox.com/styles/v1/mapbox/light-v10/tiles/256/{z}/{x}/{y}@2x?access_token={access_token}";

/// Environment variable overriding the API base URL
const API_URL_ENV: &str = "HAPPY_API_URL";
/// Environment variable holding the map tile access token
const MAP_TOKEN_ENV: &str = "HAPPY_MAP_TOKEN";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Orphanage API base URL
    pub api_url: Option<String>,
    /// Map tile URL template
    pub map_tile_url: Option<String>,
    /// Map tile access token
    pub map_access_token: Option<String>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "happy", "happy-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration, falling back to defaults on a bad file, then apply
    /// environment overrides
    pub fn resolve() -> Self {
        let config = Self::load().unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config file: {err}");
            Self::default()
        });
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(token) = lookup(MAP_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.map_access_token = Some(token);
        }
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn map_tile_url(&self) -> &str {
        self.map_tile_url.as_deref().unwrap_or(DEFAULT_MAP_TILE_URL)
    }

    pub fn map_access_token(&self) -> &str {
        self.map_access_token.as_deref().unwrap_or("")
    }
}
