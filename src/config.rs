//! Run settings
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Command-line flags
//! 2. Environment variables (`KEYDIFF_DEBUG`, then `DEBUG`)
//! 3. Config file (`--config FILE`, or `keydiff.yaml` in the working directory)
//! 4. Defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KeydiffError, Result};
use crate::ignore::IgnoreRules;
use crate::platform::Platform;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "keydiff.yaml";

/// Environment variables holding the debug level, checked in order
pub const DEBUG_ENV_VARS: &[&str] = &["KEYDIFF_DEBUG", "DEBUG"];

/// Settings for one comparison run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding `<platform>.keybindings.json` files
    pub dir: PathBuf,

    /// Reference platform id
    pub reference: String,

    /// Comparison platform ids, in priority order
    pub compare: Vec<String>,

    /// Keys ignored in addition to the defaults
    pub ignore: Vec<String>,

    /// Whether the built-in ignored keys apply
    pub default_ignores: bool,

    /// Where the override bindings are written
    pub output: PathBuf,

    /// 0 = quiet, 1 = error traces, 2 = debug logs, 3+ = per-key traces
    pub debug_level: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("vs-code-default-keybindings"),
            reference: "windows".to_string(),
            compare: vec!["linux".to_string(), "macos".to_string()],
            ignore: Vec::new(),
            default_ignores: true,
            output: PathBuf::from("overrides.json"),
            debug_level: 0,
        }
    }
}

impl Settings {
    /// Parse a YAML config file body
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| KeydiffError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Load settings from `path`, or from `keydiff.yaml` if present.
    ///
    /// Returns defaults when no file is given and none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| KeydiffError::ConfigError {
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Apply the debug level from the environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Same as [`Settings::with_env`], reading variables through `lookup`
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let found = DEBUG_ENV_VARS
            .iter()
            .find_map(|&name| lookup(name).map(|value| (name, value)));

        if let Some((name, value)) = found {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.debug_level = trimmed.parse().map_err(|_| KeydiffError::ConfigError {
                    reason: format!("{} must be a small non-negative integer, got '{}'", name, value),
                })?;
            }
        }
        Ok(self)
    }

    pub fn reference_platform(&self) -> Platform {
        Platform::new(&self.reference)
    }

    pub fn comparison_platforms(&self) -> Vec<Platform> {
        self.compare.iter().map(|id| Platform::new(id)).collect()
    }

    pub fn ignore_rules(&self) -> IgnoreRules {
        let base = if self.default_ignores {
            IgnoreRules::default()
        } else {
            IgnoreRules::empty()
        };
        base.with_keys(self.ignore.iter().cloned())
    }

    /// `tracing` filter directive for this debug level
    pub fn log_filter(&self) -> &'static str {
        match self.debug_level {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether error source chains are printed on failure
    pub fn show_error_chain(&self) -> bool {
        self.debug_level >= 1
    }
}
