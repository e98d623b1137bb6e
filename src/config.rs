//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── assets/                  # Copied verbatim to the output root
//! ├── 010-bessel-correction.md
//! └── python/
//!     └── snakebytes-enum.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Articles"
//! description = ""
//!
//! [toc]
//! heading_tags = ["H2"]     # Tags that start a section in the outline
//! label = "Contents"        # Heading above the outline navigation
//! min_sections = 1          # Hide the outline below this many sections
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::autotoc::HeadingTags;
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
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown on every page.
    pub site: SiteInfo,
    /// Table of contents settings.
    pub toc: TocConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.toc.heading_tags.is_empty() {
            return Err(ConfigError::Validation(
                "toc.heading_tags must not be empty".into(),
            ));
        }
        for tag in &self.toc.heading_tags {
            let tag = tag.trim();
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "toc.heading_tags: '{tag}' is not a tag name"
                )));
            }
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Title of the index page and suffix of every page title.
    pub title: String,
    /// Short line shown under the index title. Empty to omit.
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Articles".to_string(),
            description: String::new(),
        }
    }
}

/// Table of contents settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TocConfig {
    /// Tag names that start a section, e.g. `["H2", "H3"]`. Case-insensitive.
    pub heading_tags: Vec<String>,
    /// Heading shown above the outline navigation.
    pub label: String,
    /// Minimum number of top-level sections before the outline is shown.
    pub min_sections: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            heading_tags: vec!["H2".to_string()],
            label: "Contents".to_string(),
            min_sections: 1,
        }
    }
}

impl TocConfig {
    pub fn heading_tags(&self) -> HeadingTags {
        HeadingTags::new(&self.heading_tags)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
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
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
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
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Autotoc Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Title of the index page, also appended to every article title.
title = "Articles"

# Short line shown under the title on the index page. Empty to omit.
description = ""

# ---------------------------------------------------------------------------
# Table of contents
# ---------------------------------------------------------------------------
[toc]
# Tags that start a section in the outline. Headings with these tags found
# inside another section's heading element become its children.
# Example: ["H2", "H3"]
heading_tags = ["H2"]

# Heading shown above the outline navigation.
label = "Contents"

# Minimum number of top-level sections before the outline is shown.
min_sections = 1
"##
}
