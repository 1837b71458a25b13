//! # Configuration Module
//!
//! Engine defaults live in a TOML file in the platform config directory:
//! - Linux: `~/.config/autoplay/config.toml`
//! - macOS: `~/Library/Application Support/autoplay/config.toml`
//! - Windows: `%APPDATA%\autoplay\config.toml`
//!
//! A missing file is not an error; every key falls back to its default.
//! Command-line flags override whatever the file says.
//!
//! ```toml
//! window_minutes = 30
//! scale = 10000.0
//! parallel_threshold = 4096
//! strategy = "sliding-window"
//! ```

use crate::proximity::{EngineConfig, ProximityWindow, Strategy, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SCALE};
use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default proximity window, in minutes.
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

/// Returns the platform-appropriate config file path.
///
/// Unlike a data directory, nothing is created here: the file is optional.
///
/// # Errors
///
/// Fails if the platform has no config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a config file explicitly."
        )
    })?;

    Ok(config_dir.join("autoplay").join("config.toml"))
}

/// Runtime configuration for the proximity engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Proximity window width in minutes.
    pub window_minutes: i64,
    /// Divisor applied to proximities in seconds.
    pub scale: f64,
    /// Histories at least this long are aggregated in parallel.
    pub parallel_threshold: usize,
    pub strategy: Strategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            scale: DEFAULT_SCALE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            strategy: Strategy::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`get_config_path`] when `path` is `None`.
    ///
    /// A missing file yields the defaults. An explicitly given path that
    /// does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (get_config_path()?, false),
        };

        if !path.exists() {
            if explicit {
                bail!("Config file {} does not exist", path.display());
            }
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid values in config file {}", path.display()))?;

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.window_minutes <= 0 {
            bail!("window_minutes must be positive, got {}", self.window_minutes);
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("scale must be a positive number, got {}", self.scale);
        }
        Ok(())
    }

    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            strategy: self.strategy,
            scale: self.scale,
            parallel_threshold: self.parallel_threshold,
        }
    }

    pub fn window(&self) -> Result<ProximityWindow> {
        Ok(ProximityWindow::from_minutes(self.window_minutes)?)
    }
}
