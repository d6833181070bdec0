//! TOML-based application configuration.
//!
//! Stores:
//! - Management API endpoints for login/renewal
//! - Session warning threshold and auto-renew behavior
//! - Search debounce delay
//!
//! Configuration is stored at `~/.config/placario/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::session::ApiConfig;

/// Management API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_renew_path")]
    pub renew_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    /// Remaining seconds below which the expiry warning fires.
    #[serde(default = "default_warning_threshold_secs")]
    pub warning_threshold_secs: u64,
    /// Renew automatically instead of prompting.
    #[serde(default)]
    pub auto_renew: bool,
}

/// Search behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    /// Debounce window for search-as-you-type, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/placario/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub search: SearchSection,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:3333".into()
}
fn default_login_path() -> String {
    "/auth/login".into()
}
fn default_renew_path() -> String {
    "/auth/refresh".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_warning_threshold_secs() -> u64 {
    120
}
fn default_debounce_ms() -> u64 {
    500
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            renew_path: default_renew_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            warning_threshold_secs: default_warning_threshold_secs(),
            auto_renew: false,
        }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSection::default(),
            session: SessionSection::default(),
            search: SearchSection::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    /// Path of the live configuration file.
    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// API endpoints for the session layer.
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            login_path: self.api.login_path.clone(),
            renew_path: self.api.renew_path.clone(),
            timeout_secs: self.api.timeout_secs,
        }
    }

    /// Warning threshold in milliseconds, for the session monitor.
    pub fn warning_threshold_ms(&self) -> u64 {
        self.session.warning_threshold_secs.saturating_mul(1000)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
