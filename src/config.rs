//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file is
//! sparse: stock defaults form the base layer and the user's file overrides
//! only the keys it names.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the directory passed with `--config` (the current
//! directory by default):
//!
//! ```text
//! site/
//! ├── config.toml      # Overrides stock defaults
//! └── projects.json    # Dataset named by data.projects_file
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [data]
//! # projects_file = "projects.json"  # Dataset; built-in data when unset
//! storage_base_url = ""              # Prefix for relative image paths
//!
//! [timing]
//! exit_delay_ms = 300                # Modal exit animation length
//! carousel_interval_ms = 5000        # Hero slide duration
//!
//! [contact]
//! from = "HLA Architecture <onboarding@resend.dev>"
//! to = "hla@hla.co.za"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where project data comes from.
    pub data: DataConfig,
    /// Animation and carousel timing.
    pub timing: TimingConfig,
    /// Contact form delivery addresses.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.exit_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.exit_delay_ms must be greater than 0".into(),
            ));
        }
        if self.timing.carousel_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.carousel_interval_ms must be greater than 0".into(),
            ));
        }
        if !self.contact.to.contains('@') {
            return Err(ConfigError::Validation(
                "contact.to must be an email address".into(),
            ));
        }
        if self.contact.from.trim().is_empty() {
            return Err(ConfigError::Validation("contact.from must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// JSON dataset, relative to the config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_file: Option<String>,
    /// Base URL that relative image paths in backend rows resolve against.
    pub storage_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Delay between hiding a modal and clearing its selection.
    pub exit_delay_ms: u64,
    /// Time each hero slide stays up.
    pub carousel_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            exit_delay_ms: 300,
            carousel_interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Sender shown on outgoing contact emails.
    pub from: String,
    /// Studio inbox that receives submissions.
    pub to: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            from: "HLA Architecture <onboarding@resend.dev>".to_string(),
            to: "hla@hla.co.za".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Archfolio Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Project data
# ---------------------------------------------------------------------------
[data]
# JSON dataset with "projects" (or backend "project_rows"), "categories"
# and "hero_slides". Relative to this directory. When unset or unreadable,
# the built-in dataset is used.
# projects_file = "projects.json"

# Prefix for relative image paths in backend rows. Absolute URLs are kept.
storage_base_url = ""

# ---------------------------------------------------------------------------
# Timing
# ---------------------------------------------------------------------------
[timing]
# Milliseconds between a modal starting to close and its content clearing.
exit_delay_ms = 300

# Milliseconds each hero slide is shown before advancing.
carousel_interval_ms = 5000

# ---------------------------------------------------------------------------
# Contact form delivery
# ---------------------------------------------------------------------------
[contact]
from = "HLA Architecture <onboarding@resend.dev>"
to = "hla@hla.co.za"
"##
}
