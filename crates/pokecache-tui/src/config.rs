//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the detail API base URL, an optional catalog file, and the
//! last search text.
//!
//! Configuration is stored at `~/.config/pokecache/config.json`. The
//! `POKECACHE_API_BASE_URL` and `POKECACHE_CATALOG` environment variables
//! (also read from `.env`) override the file.

use std::path::PathBuf;

use anyhow::Result;
use pokecache_core::api::DEFAULT_API_BASE_URL;
use pokecache_core::CatalogSource;
use serde::{Deserialize, Serialize};

/// Application name used for config/log directory paths
pub const APP_NAME: &str = "pokecache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_API_BASE_URL: &str = "POKECACHE_API_BASE_URL";
const ENV_CATALOG: &str = "POKECACHE_CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub last_search: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }

    /// Apply environment overrides on top of the file values
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_API_BASE_URL).ok(),
            std::env::var(ENV_CATALOG).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, api_base_url: Option<String>, catalog: Option<String>) {
        if let Some(url) = api_base_url.filter(|s| !s.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        if let Some(path) = catalog.filter(|s| !s.trim().is_empty()) {
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn catalog_source(&self) -> CatalogSource {
        match self.catalog_path {
            Some(ref path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Bundled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert!(matches!(config.catalog_source(), CatalogSource::Bundled));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = Config {
            api_base_url: Some("https://file.example/api".to_string()),
            catalog_path: None,
            last_search: Some("pika".to_string()),
        };
        config.apply_overrides(
            Some("http://localhost:8080/pokemon".to_string()),
            Some("/tmp/catalog.json".to_string()),
        );
        assert_eq!(config.api_base_url(), "http://localhost:8080/pokemon");
        assert!(matches!(config.catalog_source(), CatalogSource::File(p) if p == PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.last_search.as_deref(), Some("pika"));
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(Some("   ".to_string()), Some(String::new()));
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_round_trip_json() {
        let config: Config = serde_json::from_str(r#"{"last_search":"char"}"#).expect("partial config");
        assert_eq!(config.last_search.as_deref(), Some("char"));
        assert_eq!(config.api_base_url, None);
    }
}
