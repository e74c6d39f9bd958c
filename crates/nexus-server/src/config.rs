//! Configuration management for the Nexus server
//!
//! Optional TOML file first, then environment overrides (`.env` is loaded by
//! `main` before this runs). Credentials only ever come from here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::RemoteBudgets;
use crate::services::scheduler::SchedulerConfig;

/// Configuration errors caught before anything starts
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: window [{min}, {max}] is empty or inverted")]
    InvalidWindow { name: &'static str, min: u64, max: u64 },

    #[error("{name}: probability {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("comment cadence [{comment_min}, {comment_max}]s must sit strictly below post cadence [{post_min}, {post_max}]s")]
    CadenceOverlap {
        comment_min: u64,
        comment_max: u64,
        post_min: u64,
        post_max: u64,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    /// Bearer token for engine control routes; unset disables auth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_key: None,
        }
    }
}

/// Remote text-generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub post_max_tokens: u32,
    pub comment_max_tokens: u32,
    pub reply_max_tokens: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.9,
            timeout_secs: 20,
            post_max_tokens: 400,
            comment_max_tokens: 150,
            reply_max_tokens: 100,
        }
    }
}

impl RemoteConfig {
    /// Remote generation runs only when enabled and a key is present
    pub fn api_key_if_enabled(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn budgets(&self) -> RemoteBudgets {
        RemoteBudgets {
            post_max_tokens: self.post_max_tokens,
            comment_max_tokens: self.comment_max_tokens,
            reply_max_tokens: self.reply_max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Post store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file the store is loaded from and written back to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
    /// Start an empty store with the human-written sample posts
    pub sample_posts: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            sample_posts: true,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub remote: RemoteConfig,
    pub scheduler: SchedulerConfig,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load from an optional TOML file, apply environment overrides, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config
            .apply_env(|key| std::env::var(key).ok())
            .context("Failed to apply environment overrides")?;
        config
            .scheduler
            .validate()
            .context("Invalid scheduler configuration")?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from `lookup` (the process environment in production)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("NEXUS_PORT") {
            self.server.port = parse_env("NEXUS_PORT", &value)?;
        }
        if let Some(value) = lookup("NEXUS_ADMIN_KEY") {
            self.server.admin_key = Some(value);
        }
        if let Some(value) = lookup("NEXUS_REMOTE_ENABLED") {
            self.remote.enabled = parse_bool("NEXUS_REMOTE_ENABLED", &value)?;
        }
        if let Some(value) = lookup("OPENAI_API_KEY") {
            self.remote.api_key = Some(value);
        }
        if let Some(value) = lookup("OPENAI_BASE_URL") {
            self.remote.base_url = value;
        }
        if let Some(value) = lookup("OPENAI_MODEL") {
            self.remote.model = value;
        }
        if let Some(value) = lookup("NEXUS_SNAPSHOT_PATH") {
            self.store.snapshot_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("NEXUS_RNG_SEED") {
            self.scheduler.rng_seed = Some(parse_env("NEXUS_RNG_SEED", &value)?);
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.remote.model, "gpt-4o-mini");
        assert_eq!(config.remote.timeout_secs, 20);
        assert_eq!(config.remote.reply_max_tokens, 100);
        assert!(config.remote.api_key_if_enabled().is_none());
        assert!(config.store.sample_posts);
        assert!(config.scheduler.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            [server]
            port = 9000

            [scheduler]
            post_interval_secs = [30, 60]
            fresh_comment_probability = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.scheduler.post_interval_secs.min(), 30);
        assert_eq!(config.scheduler.post_interval_secs.max(), 60);
        assert_eq!(config.scheduler.comment_interval_secs.max(), 24);
        assert_eq!(config.scheduler.fresh_comment_probability, 0.8);
        assert_eq!(config.remote.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[
                ("NEXUS_PORT", "3001"),
                ("OPENAI_API_KEY", "sk-test"),
                ("NEXUS_REMOTE_ENABLED", "yes"),
                ("NEXUS_RNG_SEED", "42"),
                ("NEXUS_SNAPSHOT_PATH", "/tmp/posts.json"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.remote.api_key_if_enabled(), Some("sk-test"));
        assert_eq!(config.scheduler.rng_seed, Some(42));
        assert_eq!(
            config.store.snapshot_path,
            Some(PathBuf::from("/tmp/posts.json"))
        );
    }

    #[test]
    fn test_remote_disabled_hides_key() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("NEXUS_REMOTE_ENABLED", "false"),
            ]))
            .unwrap();
        assert!(config.remote.api_key_if_enabled().is_none());
    }

    #[test]
    fn test_invalid_env_is_rejected() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(env(&[("NEXUS_PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                key: "NEXUS_PORT",
                value: "eighty".to_string()
            }
        );
    }
}
