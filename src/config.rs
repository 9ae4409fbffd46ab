// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::client::DEFAULT_ENDPOINT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analysis service
    pub endpoint: String,
    /// Request timeout in seconds (the analysis can be slow)
    pub timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a configuration key by name
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "endpoint" => Ok(self.endpoint.clone()),
            "timeout_secs" => Ok(self.timeout_secs.to_string()),
            "log_level" => Ok(self.log_level.clone()),
            other => anyhow::bail!(
                "Unknown config key: {other}. Valid: endpoint, timeout_secs, log_level"
            ),
        }
    }

    /// Set a configuration key by name
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "endpoint" => self.endpoint = value.trim_end_matches('/').to_string(),
            "timeout_secs" => {
                self.timeout_secs = value
                    .parse()
                    .with_context(|| format!("timeout_secs must be an integer, got '{value}'"))?;
            }
            "log_level" => self.log_level = value.to_string(),
            other => anyhow::bail!(
                "Unknown config key: {other}. Valid: endpoint, timeout_secs, log_level"
            ),
        }
        Ok(())
    }
}

/// Resolve the configuration file path.
///
/// `CODEXFLOW_CONFIG` wins; otherwise the platform config directory.
#[must_use]
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CODEXFLOW_CONFIG") {
        return PathBuf::from(path);
    }

    directories::ProjectDirs::from("org", "hyperpolymath", "codexflow")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".codexflow/config.toml"))
}

/// Load configuration from disk or use defaults
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

/// Load configuration from a specific path, defaulting when absent
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write configuration to its file
pub fn save(config: &Config) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut config = Config::default();
        config.set("endpoint", "http://example.com/").unwrap();
        assert_eq!(config.get("endpoint").unwrap(), "http://example.com");

        config.set("timeout_secs", "30").unwrap();
        assert_eq!(config.get("timeout_secs").unwrap(), "30");

        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.get("nope").is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("endpoint = \"http://10.0.0.1:8000\"").unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.1:8000");
        assert_eq!(config.timeout_secs, 120);
    }
}
