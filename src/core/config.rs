// src/core/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::probe::StatusFormat;

use tracing::info;

use super::config_loader::ConfigPaths;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    // Number of snapshots to take
    pub samples: u32,
    // Pause between snapshots
    pub interval_ms: u64,
    pub status_format: StatusFormat,
    // Append every snapshot line to this file as well
    pub output: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            samples: 1,
            interval_ms: 1000,
            status_format: StatusFormat::Text,
            output: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    // tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    // Loads system default and then overrides with user config, if present
    pub fn load() -> Result<Self> {
        let ConfigPaths { system, user } = ConfigPaths::discover();
        info!(system = ?system, user = ?user, "Loading configuration paths");

        // 1. Read system default, if the package shipped one
        let mut cfg = if system.exists() {
            info!(path = ?system, "Reading system default config");
            Self::read(&system)?
        } else {
            info!(path = ?system, "No system default config; using built-in defaults");
            Config::default()
        };

        // 2. If user config exists, it replaces the defaults
        if user.exists() {
            info!(path = ?user, "Overlaying user configuration");
            let user_cfg = Self::read(&user)?;
            cfg.log_level = user_cfg.log_level;
            cfg.probe = user_cfg.probe;
        } else {
            info!(path = ?user, "No user config found; using defaults");
        }

        cfg.validate()?;
        info!(?cfg, "Configuration loaded successfully");
        Ok(cfg)
    }

    // Loads a single explicit file, skipping the system/user layering
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = Self::read(path)?;
        cfg.validate()?;
        info!(path = ?path, ?cfg, "Configuration loaded successfully");
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text).context("Parsing config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.probe.samples == 0 {
            anyhow::bail!("probe.samples must be at least 1");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("log_level must not be empty");
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Reading config at {path:?}"))?;
        toml::from_str(&text).with_context(|| format!("Parsing config at {path:?}"))
    }
}

fn default_log_level() -> String {
    super::logging::DEFAULT_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_log_level(),
            probe: ProbeConfig::default(),
        }
    }
}
