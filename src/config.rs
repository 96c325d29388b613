//! Application configuration.
//!
//! Handles loading, validating, and merging `config.toml` files. Values are
//! layered: stock defaults, then `config.toml` in the data directory, then
//! an explicit `--config` file. Each layer only needs the keys it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [dataset]
//! users = "users.json"      # File names inside the data directory
//! albums = "albums.json"
//! photos = "photos.json"
//!
//! [view]
//! title = "Photos from albums"
//! default_sort = "unset"    # unset | id | photoName | albumName | userName
//! no_results_message = "No photos matching selected criteria"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sort::SortKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Data file names.
    pub dataset: DatasetConfig,
    /// Presentation settings shared by the text and HTML views.
    pub view: ViewConfig,
}

impl AppConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("dataset.users", &self.dataset.users),
            ("dataset.albums", &self.dataset.albums),
            ("dataset.photos", &self.dataset.photos),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.view.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "view.title must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// File names of the three collections, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub users: String,
    pub albums: String,
    pub photos: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            users: "users.json".to_string(),
            albums: "albums.json".to_string(),
            photos: "photos.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Page heading and HTML `<title>`.
    pub title: String,
    /// Sort key applied before any `--sort` flag or `sort` command.
    pub default_sort: SortKey,
    /// Shown instead of rows when nothing matches.
    pub no_results_message: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "Photos from albums".to_string(),
            default_sort: SortKey::Unset,
            no_results_message: "No photos matching selected criteria".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a TOML file as a raw value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge the overlays onto the stock defaults in order, then deserialize
/// and validate.
pub fn resolve_config(
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .fold(stock_defaults_value(), merge_toml);
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config.
///
/// Layers `<data_dir>/config.toml` (when a data directory is given and the
/// file exists) and then `explicit` (which must exist) over the defaults.
pub fn load_config(
    data_dir: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(dir) = data_dir
        && let Some(value) = load_raw_config(&dir.join("config.toml"))?
    {
        log::debug!("using {}", dir.join("config.toml").display());
        overlays.push(value);
    }
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)?;
        log::debug!("using {}", path.display());
        overlays.push(toml::from_str(&content)?);
    }
    resolve_config(overlays)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-table configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config is read from <data>/config.toml, then from --config <file>.
# Each layer only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Dataset files, relative to the data directory
# ---------------------------------------------------------------------------
[dataset]
users = "users.json"
albums = "albums.json"
photos = "photos.json"

# ---------------------------------------------------------------------------
# View
# ---------------------------------------------------------------------------
[view]
# Page heading and HTML <title>.
title = "Photos from albums"

# Initial sort order: unset, id, photoName, albumName or userName.
# "unset" keeps the order of photos.json.
default_sort = "unset"

# Shown when no photo matches the current filters.
no_results_message = "No photos matching selected criteria"
"##
}
