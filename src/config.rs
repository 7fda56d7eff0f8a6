//! Run configuration.
//!
//! Handles loading, validating, and resolving `gallery.toml`. Stock defaults
//! are overridden by the user's file, and command-line flags override both.
//! The result is a [`Job`]: the concrete folders and names for one year.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! year = "2024"
//! label = "RoboCamp"
//! # prefix = "RoboCamp-2024"   # default: "{label}-{year}"
//!
//! [paths]
//! original_root = "original"  # input:  {original_root}/{year}/
//! img_root = "img"            # output: {img_root}/{year}/
//! thumb_root = "thumb"        # output: {thumb_root}/{year}/
//! html_output = "generateGallery.html"
//!
//! [images]
//! full_max_edge = 1500        # longer edge of the display copy
//! thumb_max_edge = 500        # longer edge of the thumbnail
//! quality = 75                # JPEG quality (1-100)
//!
//! [gallery]
//! visible_count = 5           # items shown before the "show more" button
//! more_label = "Zobrazit více"
//!
//! [processing]
//! max_processes = 4           # Max parallel encoders (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! year = "2025"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
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

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults reproducing a single-year RoboCamp gallery.
/// User config files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Year label: input/output subfolder name and HTML id/class suffix.
    pub year: String,
    /// Event label; the default prefix is `{label}-{year}`.
    pub label: String,
    /// Explicit output filename prefix, replacing `{label}-{year}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Folder roots and the HTML output path.
    pub paths: PathsConfig,
    /// Resize bounds and encoding quality.
    pub images: ImagesConfig,
    /// Rendered fragment settings.
    pub gallery: LayoutConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            year: "2024".to_string(),
            label: "RoboCamp".to_string(),
            prefix: None,
            paths: PathsConfig::default(),
            images: ImagesConfig::default(),
            gallery: LayoutConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_year(&self.year)?;
        if self.images.full_max_edge == 0 || self.images.thumb_max_edge == 0 {
            return Err(ConfigError::Validation(
                "images.full_max_edge and images.thumb_max_edge must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.prefix.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation("prefix must not be empty".into()));
        }
        Ok(())
    }
}

/// The year ends up in folder names, HTML ids, CSS classes and a script
/// selector, so only characters that are safe in all four are accepted.
fn validate_year(year: &str) -> Result<(), ConfigError> {
    if year.is_empty() {
        return Err(ConfigError::Validation("year must not be empty".into()));
    }
    if !year
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "year '{year}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Folder roots. The year is appended to each root to form the job folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub original_root: PathBuf,
    pub img_root: PathBuf,
    pub thumb_root: PathBuf,
    /// Where the HTML fragment is written (overwritten on every run).
    pub html_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            original_root: "original".into(),
            img_root: "img".into(),
            thumb_root: "thumb".into(),
            html_output: "generateGallery.html".into(),
        }
    }
}

/// Resize bounds and JPEG quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Longer-edge cap for the display copy, in pixels.
    pub full_max_edge: u32,
    /// Longer-edge cap for the thumbnail, in pixels.
    pub thumb_max_edge: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            full_max_edge: 1500,
            thumb_max_edge: 500,
            quality: 75,
        }
    }
}

/// Settings for the rendered HTML fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of items visible before the reveal button.
    pub visible_count: usize,
    /// Text of the reveal button.
    pub more_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            visible_count: 5,
            more_label: "Zobrazit více".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image encoders.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Job resolution
// =============================================================================

/// Command-line overrides, applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct JobOverrides {
    pub year: Option<String>,
    pub input: Option<PathBuf>,
    pub full_output: Option<PathBuf>,
    pub thumb_output: Option<PathBuf>,
    pub prefix: Option<String>,
    pub html_output: Option<PathBuf>,
}

/// The concrete parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub year: String,
    pub input_dir: PathBuf,
    pub full_dir: PathBuf,
    pub thumb_dir: PathBuf,
    pub prefix: String,
    pub html_output: PathBuf,
}

impl Job {
    /// Derive the job folders from the config roots and the year.
    pub fn from_config(config: &GalleryConfig) -> Self {
        let year = &config.year;
        Self {
            year: year.clone(),
            input_dir: config.paths.original_root.join(year),
            full_dir: config.paths.img_root.join(year),
            thumb_dir: config.paths.thumb_root.join(year),
            prefix: config
                .prefix
                .clone()
                .unwrap_or_else(|| crate::naming::default_prefix(&config.label, year)),
            html_output: config.paths.html_output.clone(),
        }
    }

    /// Apply overrides, then derive the job.
    ///
    /// A year override re-derives every folder and the default prefix;
    /// explicit folder or prefix overrides win over derived values.
    pub fn resolve(config: &GalleryConfig, overrides: &JobOverrides) -> Result<Self, ConfigError> {
        let mut config = config.clone();
        if let Some(year) = &overrides.year {
            config.year = year.clone();
        }
        if let Some(prefix) = &overrides.prefix {
            config.prefix = Some(prefix.clone());
        }
        config.validate()?;

        let mut job = Self::from_config(&config);
        if let Some(input) = &overrides.input {
            job.input_dir = input.clone();
        }
        if let Some(full) = &overrides.full_output {
            job.full_dir = full.clone();
        }
        if let Some(thumb) = &overrides.thumb_output {
            job.thumb_dir = thumb.clone();
        }
        if let Some(html) = &overrides.html_output {
            job.html_output = html.clone();
        }
        Ok(job)
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
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file path.
///
/// A missing file yields the stock defaults. Otherwise user values are
/// merged on top of the defaults, unknown keys are rejected, and the
/// result is validated.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("{} not found, using stock defaults", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# year-gal configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
# Command-line flags (--year, --input, --prefix, ...) override this file.

# Year being processed. Selects {root}/{year}/ folders and suffixes the
# HTML ids and classes. Letters, digits, '-' and '_' only.
year = "2024"

# Event label. Output files are named {label}-{year}-NNNN.jpg.
label = "RoboCamp"

# Set to replace the "{label}-{year}" filename prefix entirely.
# prefix = "RoboCamp-2024"

# ---------------------------------------------------------------------------
# Folders
# ---------------------------------------------------------------------------
[paths]
# Source photographs are read from {original_root}/{year}/ (not recursive).
original_root = "original"

# Display copies go to {img_root}/{year}/, thumbnails to {thumb_root}/{year}/.
img_root = "img"
thumb_root = "thumb"

# The HTML fragment is written here, replacing any previous content.
html_output = "generateGallery.html"

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[images]
# Longer-edge caps in pixels. Smaller sources are never upscaled.
full_max_edge = 1500
thumb_max_edge = 500

# JPEG encoding quality (1 = worst, 100 = best).
quality = 75

# ---------------------------------------------------------------------------
# HTML fragment
# ---------------------------------------------------------------------------
[gallery]
# Items shown before the "show more" button; the rest start hidden.
visible_count = 5

# Text of the "show more" button.
more_label = "Zobrazit více"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image encoders.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
