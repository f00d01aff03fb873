//! Configuration file support
//!
//! Supports TOML configuration files with the following search order:
//! 1. `--config <path>` - explicitly specified path
//! 2. `./cardgrid.toml` - current directory
//! 3. `~/.config/cardgrid/config.toml` - user config
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [scan]
//! threshold = 0.8
//! match_mode = "exact"
//!
//! [sheets]
//! categories = ["action", "money", "property", "wild"]
//! path_template = "/tmp/{name}_cards.png"
//!
//! [sheets.paths]
//! wild = "/data/wild_sheet.png"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::batch::BatchOptions;
use crate::scanner::{MatchMode, ScanOptions};

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// File not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Scanner configuration options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Background fraction threshold
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Background matching mode (exact or tolerance)
    #[serde(default)]
    pub match_mode: Option<MatchMode>,

    /// Per-channel tolerance for tolerance mode
    #[serde(default)]
    pub tolerance: Option<u8>,
}

/// Sheet location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetsConfig {
    /// Ordered category names
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Path template with a `{name}` placeholder
    #[serde(default)]
    pub path_template: Option<String>,

    /// Explicit per-category paths
    #[serde(default)]
    pub paths: Option<BTreeMap<String, PathBuf>>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Scanner settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Sheet locations
    #[serde(default)]
    pub sheets: SheetsConfig,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default search path
    pub fn load() -> Result<Self, ConfigError> {
        let current_dir_config = PathBuf::from("cardgrid.toml");
        if current_dir_config.exists() {
            return Self::load_from_path(&current_dir_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cardgrid").join("config.toml");
            if user_config.exists() {
                return Self::load_from_path(&user_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Convert to BatchOptions
    pub fn to_batch_options(&self) -> BatchOptions {
        let mut options = BatchOptions::default();

        let mut scan = ScanOptions::builder();
        if let Some(threshold) = self.scan.threshold {
            scan = scan.threshold(threshold);
        }
        if let Some(tolerance) = self.scan.tolerance {
            scan = scan.tolerance(tolerance);
        }
        let mut scan = scan.build();
        // match_mode wins over the mode implied by a tolerance value
        if let Some(mode) = self.scan.match_mode {
            scan.match_mode = mode;
        }
        options.scan = scan;

        if let Some(categories) = &self.sheets.categories {
            options.categories = categories.clone();
        }
        if let Some(template) = &self.sheets.path_template {
            options.path_template = template.clone();
        }
        if let Some(paths) = &self.sheets.paths {
            options.paths = paths.clone();
        }

        options
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> BatchOptions {
        let mut options = self.to_batch_options();

        if let Some(threshold) = cli.threshold {
            options.scan.threshold = threshold.clamp(0.0, 1.0);
        }
        if let Some(tolerance) = cli.tolerance {
            options.scan.tolerance = tolerance;
            options.scan.match_mode = MatchMode::Tolerance;
        }
        if let Some(mode) = cli.match_mode {
            options.scan.match_mode = mode;
        }
        if let Some(categories) = &cli.categories {
            options.categories = categories.clone();
        }
        if let Some(template) = &cli.path_template {
            options.path_template = template.clone();
        }
        for (name, path) in &cli.paths {
            options.paths.insert(name.clone(), path.clone());
        }

        options
    }

    /// Get config file search paths
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("cardgrid.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cardgrid").join("config.toml"));
        }

        paths
    }
}

/// CLI override values for merging with config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub match_mode: Option<MatchMode>,
    pub tolerance: Option<u8>,
    pub categories: Option<Vec<String>>,
    pub path_template: Option<String>,
    pub paths: BTreeMap<String, PathBuf>,
}

impl CliOverrides {
    /// Create new empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set threshold override
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set tolerance override
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Set category list override
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }
}
