//! Configuration loading and persistence.
//!
//! Settings live in a TOML file at `<config dir>/rideup/config.toml`.
//! A missing file means defaults; missing keys in an older file take their
//! defaults too, so upgrades don't invalidate existing configs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recordings: RecordingsConfig,
    pub converter: ConverterConfig,
    pub strava: StravaConfig,
    pub upload: UploadConfig,
}

/// Where recordings come from and which ones count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingsConfig {
    /// Directory the cycling app writes recordings into.
    pub directory: PathBuf,
    /// Files at or below this size are keepalive recordings, not sessions.
    pub min_size_bytes: u64,
    /// Recording file extension.
    pub extension: String,
}

impl Default for RecordingsConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            directory: home.join("Documents").join("Zwift").join("Activities"),
            min_size_bytes: 4096,
            extension: "fit".to_string(),
        }
    }
}

/// External FIT-to-TCX converter invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Converter command; must be on PATH or an absolute path.
    pub command: String,
    /// Per-file conversion timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: "fittotcx".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Strava application credentials and authorization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StravaConfig {
    /// API application client id (from the Strava developer settings).
    pub client_id: String,
    /// API application client secret.
    pub client_secret: String,
    /// Loopback port the authorization redirect lands on.
    pub redirect_port: u16,
    /// How long to wait for the browser authorization, in seconds.
    pub auth_timeout_secs: u64,
    /// Name given to uploaded activities.
    pub activity_name: String,
    /// Mark uploads as trainer rides.
    pub trainer: bool,
    /// Open the created activity in the browser after upload.
    pub open_activity: bool,
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_port: 8000,
            auth_timeout_secs: 300,
            activity_name: "Turbo Session".to_string(),
            trainer: true,
            open_activity: true,
        }
    }
}

/// Upload status polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Seconds between upload status polls.
    pub poll_interval_secs: u64,
    /// Give up after this many polls.
    pub poll_max_attempts: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            poll_max_attempts: 30,
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine the user config directory")?;
        Ok(base.join("rideup").join("config.toml"))
    }

    /// Loads the configuration, falling back to defaults when no file
    /// exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Writes the configuration, creating the config directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
