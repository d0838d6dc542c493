//! Configuration loading and discovery for `spritecut.toml`
//!
//! Provides functions to find, load, and merge configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::SpritecutConfig;
use crate::export::ExportFormat;

/// Configuration file name searched for by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "spritecut.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritecut.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override mask color
    pub mask: Option<String>,
    /// Override row Y tolerance
    pub y_tolerance: Option<i32>,
    /// Override row normalization
    pub normalize: Option<bool>,
    /// Override output format
    pub format: Option<ExportFormat>,
    /// Override coordinate block name
    pub field_name: Option<String>,
    /// Override sprite duration
    pub duration: Option<u32>,
    /// Override row grouping in output
    pub group_rows: Option<bool>,
    /// Override pretty printing
    pub pretty: Option<bool>,
}

/// Find spritecut.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for spritecut.toml
/// 2. Check XDG_CONFIG_HOME/spritecut/spritecut.toml (or ~/.config/spritecut/spritecut.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find spritecut.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritecut").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find spritecut.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Reached root, no config found
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] and falls back to defaults when nothing is found.
pub fn load_config(path: Option<&Path>) -> Result<SpritecutConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("config: loading {}", p.display());
            load_config_file(&p)
        }
        None => Ok(SpritecutConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritecutConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpritecutConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

/// Validate a configuration, collecting every problem into one error.
pub fn check(config: &SpritecutConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SpritecutConfig, overrides: &CliOverrides) {
    if let Some(ref mask) = overrides.mask {
        config.detect.mask = Some(mask.clone());
    }
    if let Some(y_tolerance) = overrides.y_tolerance {
        config.detect.y_tolerance = y_tolerance;
    }
    if let Some(normalize) = overrides.normalize {
        config.detect.normalize = normalize;
    }
    if let Some(format) = overrides.format {
        config.export.format = format;
    }
    if let Some(ref field_name) = overrides.field_name {
        config.export.field_name = field_name.clone();
    }
    if let Some(duration) = overrides.duration {
        config.export.duration = duration;
    }
    if let Some(group_rows) = overrides.group_rows {
        config.export.group_rows = group_rows;
    }
    if let Some(pretty) = overrides.pretty {
        config.export.pretty = pretty;
    }
}
