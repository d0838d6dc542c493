//! Configuration schema types for `spritecut.toml`
//!
//! Defines the structure and validation rules for slicing configuration.

use serde::{Deserialize, Serialize};

use crate::color::{parse_hex_color, ColorError};
use crate::export::{ExportFormat, ExportOptions, DEFAULT_FIELD_NAME};
use crate::pipeline::SliceOptions;

/// Detection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Exact background color as hex (`#RRGGBB` etc.); alpha is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Maximum Y difference for sprites sharing a row
    #[serde(default)]
    pub y_tolerance: i32,
    /// Unify sprite sizes within each row
    #[serde(default = "default_true")]
    pub normalize: bool,
    /// Refuse images with more pixels than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<u64>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self { mask: None, y_tolerance: 0, normalize: true, max_pixels: None }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (json or xml)
    #[serde(default)]
    pub format: ExportFormat,
    /// Name of the coordinate block per sprite
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// Duration written for every sprite
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Group sprites by row in the output
    #[serde(default)]
    pub group_rows: bool,
    /// Loop flag for grouped rows
    #[serde(rename = "loop", default = "default_true")]
    pub looping: bool,
    /// Pretty print output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            field_name: default_field_name(),
            duration: default_duration(),
            group_rows: false,
            looping: true,
            pretty: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

fn default_duration() -> u32 {
    1
}

/// Complete `spritecut.toml` configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpritecutConfig {
    #[serde(default)]
    pub detect: DetectConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "detect.y_tolerance")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spritecut.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritecutConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.detect.y_tolerance < 0 {
            errors.push(ConfigValidationError {
                field: "detect.y_tolerance".to_string(),
                message: "must be zero or a positive integer".to_string(),
            });
        }

        if let Some(mask) = &self.detect.mask {
            if let Err(e) = parse_hex_color(mask) {
                errors.push(ConfigValidationError {
                    field: "detect.mask".to_string(),
                    message: format!("is not a valid color: {}", e),
                });
            }
        }

        if self.detect.max_pixels == Some(0) {
            errors.push(ConfigValidationError {
                field: "detect.max_pixels".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.export.field_name.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "export.field_name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        errors
    }

    /// Pipeline options described by the `[detect]` section.
    pub fn slice_options(&self) -> Result<SliceOptions, ColorError> {
        let mask = self.detect.mask.as_deref().map(parse_hex_color).transpose()?;
        Ok(SliceOptions {
            mask,
            y_tolerance: self.detect.y_tolerance,
            normalize: self.detect.normalize,
        })
    }

    /// Exporter options described by the `[export]` section.
    ///
    /// Grouped output reuses the detection tolerance so rows match the ones
    /// the normalizer saw.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            field_name: self.export.field_name.clone(),
            duration: self.export.duration,
            row_tolerance: self.export.group_rows.then_some(self.detect.y_tolerance),
            looping: self.export.looping,
            pretty: self.export.pretty,
        }
    }
}
