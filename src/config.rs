//! Site configuration module.
//!
//! Handles loading, merging, and validating `folio.toml`. Values are layered:
//! stock defaults, then the user's file, then environment overrides. Each
//! layer only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Portfolio"   # Used when the metadata row is missing
//!
//! [source]
//! kind = "live"              # "live" (REST backend) or "snapshot" (JSON file)
//! url = ""                   # Backend project URL          (FOLIO_SUPABASE_URL)
//! anon_key = ""              # Public anonymous API key     (FOLIO_SUPABASE_ANON_KEY)
//! snapshot = "content.json"  # Snapshot path, relative to this file (FOLIO_SNAPSHOT)
//! timeout_secs = 10          # Per-request timeout for the live backend
//!
//! [gallery]
//! section = "Brand/Web"      # Gallery section shown on /gallery/
//!
//! [layout]
//! bento_spans = [[2, 2], [1, 1], [1, 2], [1, 1], [1, 1], [2, 1]]
//! ```
//!
//! ## Fail Fast
//!
//! A live source needs both `url` and `anon_key`. If either is missing after
//! all layers are merged, loading fails with [`ConfigError::MissingConnection`]
//! before any query is issued. Unknown keys are rejected to catch typos early.

use crate::widgets::{BentoLayout, DEFAULT_SPANS, SpanPattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const ENV_URL: &str = "FOLIO_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "FOLIO_SUPABASE_ANON_KEY";
pub const ENV_SNAPSHOT: &str = "FOLIO_SNAPSHOT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("live source needs {missing}: set it in [source] or via the environment")]
    MissingConnection { missing: String },
}

/// Site configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Title used when no metadata row is available.
    pub site_title: String,
    /// Where content is read from.
    pub source: SourceConfig,
    /// Gallery page settings.
    pub gallery: GalleryConfig,
    /// Grid layout settings.
    pub layout: LayoutConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            source: SourceConfig::default(),
            gallery: GalleryConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate values and required connection parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be at least 1".into(),
            ));
        }
        if self.gallery.section.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.section must not be empty".into(),
            ));
        }
        if self.layout.bento().is_none() {
            return Err(ConfigError::Validation(
                "layout.bento_spans must be a non-empty list of non-zero [columns, rows] pairs"
                    .into(),
            ));
        }
        match self.source.kind {
            SourceKind::Live => {
                let mut missing = Vec::new();
                if self.source.url.trim().is_empty() {
                    missing.push(format!("source.url ({ENV_URL})"));
                }
                if self.source.anon_key.trim().is_empty() {
                    missing.push(format!("source.anon_key ({ENV_ANON_KEY})"));
                }
                if !missing.is_empty() {
                    return Err(ConfigError::MissingConnection {
                        missing: missing.join(" and "),
                    });
                }
            }
            SourceKind::Snapshot => {
                if self.source.snapshot.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "source.snapshot must name a file".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Live,
    Snapshot,
}

/// Data source connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Backend project URL.
    pub url: String,
    /// Public anonymous key sent with every request.
    pub anon_key: String,
    /// Snapshot file, relative to the config file's directory.
    pub snapshot: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Live,
            url: String::new(),
            anon_key: String::new(),
            snapshot: "content.json".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub section: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            section: "Brand/Web".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Repeating `[columns, rows]` spans for bento grids.
    pub bento_spans: Vec<SpanPattern>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bento_spans: DEFAULT_SPANS.to_vec(),
        }
    }
}

impl LayoutConfig {
    pub fn bento(&self) -> Option<BentoLayout> {
        BentoLayout::new(self.bento_spans.clone())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
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

/// Load a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Build the environment override layer from a variable lookup.
///
/// Empty variables are treated as unset.
pub fn env_overlay(lookup: impl Fn(&str) -> Option<String>) -> toml::Value {
    let mut source = toml::map::Map::new();
    for (var, key) in [
        (ENV_URL, "url"),
        (ENV_ANON_KEY, "anon_key"),
        (ENV_SNAPSHOT, "snapshot"),
    ] {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            source.insert(key.to_string(), toml::Value::String(value));
        }
    }
    let mut root = toml::map::Map::new();
    if !source.is_empty() {
        root.insert("source".to_string(), toml::Value::Table(source));
    }
    toml::Value::Table(root)
}

/// Merge layers on top of stock defaults, then deserialize and validate.
pub fn resolve_config(layers: impl IntoIterator<Item = toml::Value>) -> Result<SiteConfig, ConfigError> {
    let merged = layers.into_iter().fold(stock_defaults_value(), merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `path` (if present) plus process environment overrides.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let file = load_raw_config(path)?;
    let env = env_overlay(|var| std::env::var(var).ok());
    resolve_config(file.into_iter().chain(std::iter::once(env)))
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Environment variables override this file:
#   FOLIO_SUPABASE_URL       -> source.url
#   FOLIO_SUPABASE_ANON_KEY  -> source.anon_key
#   FOLIO_SNAPSHOT           -> source.snapshot
#
# Unknown keys will cause an error.

# Title used when the portfolio_metadata table has no row.
site_title = "Portfolio"

# ---------------------------------------------------------------------------
# Content source
# ---------------------------------------------------------------------------
[source]
# "live" reads the hosted database over REST; "snapshot" reads a JSON dump
# written by `folio snapshot`.
kind = "live"

# Backend project URL and public anonymous key. Both are required for "live".
url = ""
anon_key = ""

# Snapshot file, relative to this config file.
snapshot = "content.json"

# Per-request timeout for the live backend, in seconds.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Gallery page
# ---------------------------------------------------------------------------
[gallery]
# Which gallery_items section the /gallery/ page shows.
section = "Brand/Web"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Repeating [columns, rows] tile spans for bento grids. Tile N gets entry
# N mod (number of entries).
bento_spans = [[2, 2], [1, 1], [1, 2], [1, 1], [1, 1], [2, 1]]
"##
}
