//! CLI configuration.
//!
//! Handles:
//! - Default output format
//! - Default log level
//!
//! Values come from `config.json` in the platform config directory, then
//! `MESHCTL_*` environment variables; command-line flags win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Get the config directory path, if the platform has one.
fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "meshscope", "meshctl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output format used when `--output` is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk and the environment.
    pub fn load() -> Result<Self> {
        let config = Self::load_in(config_dir().as_deref())?;
        config.with_overrides(
            std::env::var("MESHCTL_FORMAT").ok(),
            std::env::var("MESHCTL_LOG_LEVEL").ok(),
        )
    }

    /// Load `config.json` from `dir`. Without a config directory (no home
    /// directory, e.g. in a bare container) the defaults apply.
    pub fn load_in(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load_from(&dir.join(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or return the default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Apply environment-style overrides on top of loaded values.
    pub fn with_overrides(
        mut self,
        format: Option<String>,
        log_level: Option<String>,
    ) -> Result<Self> {
        if let Some(format) = format {
            self.format = OutputFormat::parse(&format)
                .with_context(|| format!("MESHCTL_FORMAT must be short or json, got {format:?}"))?;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
        Ok(self)
    }
}
