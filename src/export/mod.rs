//! Export formats for sliced sprite lists.
//!
//! Exporters turn the ordered region list produced by [`crate::pipeline`]
//! into a document an animation or asset pipeline can load. They only
//! format; no detection happens here.
//!
//! # Supported Formats
//!
//! - **JSON**: array of named frames, or of named rows holding frames
//! - **XML**: `Spritesheet` document with the same two layouts
//!
//! # Naming
//!
//! Sprites are named with six-digit zero-padded counters (`000000`,
//! `000001`, ...). When rows are grouped, each row is named by its
//! six-digit index and its sprites are prefixed with it (`000002_000000`).
//! Sprite counters restart in every row.
//!
//! # Example
//!
//! ```ignore
//! use spritecut::export::{ExportOptions, Exporter, JsonExporter};
//!
//! let json = JsonExporter::new().export_to_string(&regions, &ExportOptions::default())?;
//! ```

pub mod json;
pub mod xml;

pub use json::*;
pub use xml::*;

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::SpriteRegion;
use crate::rows::group_by_row;

/// Default name of the coordinate block in each exported sprite.
pub const DEFAULT_FIELD_NAME: &str = "Frame";

/// Common error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during file writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Options for export operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Name of the coordinate block (`{X, Y, Width, Height}`) per sprite
    pub field_name: String,
    /// Duration value written for every sprite
    pub duration: u32,
    /// Group sprites into rows using this Y tolerance; `None` writes a flat list
    pub row_tolerance: Option<i32>,
    /// Loop flag written for every row in grouped output
    pub looping: bool,
    /// Pretty print output (with indentation)
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_FIELD_NAME.to_string(),
            duration: 1,
            row_tolerance: None,
            looping: true,
            pretty: true,
        }
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Xml,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    /// Exporter implementing this format.
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Json => Box::new(JsonExporter::new()),
            ExportFormat::Xml => Box::new(XmlExporter::new()),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(ExportError::Config(format!(
                "unknown export format '{}', expected json or xml",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Render the region list as a document.
    fn export_to_string(&self, regions: &[SpriteRegion], options: &ExportOptions)
        -> Result<String>;

    /// Export the region list to the specified path.
    fn export(
        &self,
        regions: &[SpriteRegion],
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let content = self.export_to_string(regions, options)?;

        // Ensure parent directory exists
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}

/// A sprite with its generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSprite {
    pub name: String,
    pub region: SpriteRegion,
}

/// A row of sprites with its generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRow {
    pub name: String,
    pub sprites: Vec<NamedSprite>,
}

/// Sprites laid out for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Flat(Vec<NamedSprite>),
    Rows(Vec<NamedRow>),
}

/// Six-digit zero-padded counter.
pub fn sprite_name(index: usize) -> String {
    format!("{:06}", index)
}

/// Name of a sprite inside a grouped row.
pub fn row_sprite_name(row: usize, index: usize) -> String {
    format!("{:06}_{:06}", row, index)
}

/// Name the regions according to the options' layout.
pub fn layout(regions: &[SpriteRegion], options: &ExportOptions) -> Result<Layout> {
    let Some(tolerance) = options.row_tolerance else {
        let sprites = regions
            .iter()
            .enumerate()
            .map(|(i, region)| NamedSprite { name: sprite_name(i), region: *region })
            .collect();
        return Ok(Layout::Flat(sprites));
    };

    let rows = group_by_row(regions, tolerance).map_err(|e| ExportError::Config(e.to_string()))?;
    let named = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| NamedRow {
            name: sprite_name(row_index),
            sprites: row
                .regions()
                .iter()
                .enumerate()
                .map(|(i, region)| NamedSprite {
                    name: row_sprite_name(row_index, i),
                    region: *region,
                })
                .collect(),
        })
        .collect();
    Ok(Layout::Rows(named))
}

/// Reject an empty coordinate block name.
pub(crate) fn check_field_name(options: &ExportOptions) -> Result<()> {
    if options.field_name.trim().is_empty() {
        return Err(ExportError::Config("field name must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<SpriteRegion> {
        vec![
            SpriteRegion::new(0, 0, 4, 4),
            SpriteRegion::new(8, 1, 4, 4),
            SpriteRegion::new(0, 10, 4, 4),
        ]
    }

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert_eq!(options.field_name, "Frame");
        assert_eq!(options.duration, 1);
        assert_eq!(options.row_tolerance, None);
        assert!(options.looping);
        assert!(options.pretty);
    }

    #[test]
    fn test_export_error_display() {
        let io_err =
            ExportError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));

        let cfg_err = ExportError::Config("missing field".to_string());
        assert!(cfg_err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("XML".parse::<ExportFormat>().unwrap(), ExportFormat::Xml);
        assert!("yaml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_exporter() {
        assert_eq!(ExportFormat::Json.exporter().extension(), "json");
        assert_eq!(ExportFormat::Xml.exporter().extension(), "xml");
    }

    #[test]
    fn test_names() {
        assert_eq!(sprite_name(0), "000000");
        assert_eq!(sprite_name(42), "000042");
        assert_eq!(row_sprite_name(3, 7), "000003_000007");
    }

    #[test]
    fn test_flat_layout() {
        let layout = layout(&regions(), &ExportOptions::default()).unwrap();
        let Layout::Flat(sprites) = layout else { panic!("expected flat layout") };
        let names: Vec<&str> = sprites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["000000", "000001", "000002"]);
    }

    #[test]
    fn test_row_layout_restarts_counters() {
        let options = ExportOptions { row_tolerance: Some(1), ..Default::default() };
        let Layout::Rows(rows) = layout(&regions(), &options).unwrap() else {
            panic!("expected row layout")
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "000000");
        assert_eq!(rows[0].sprites[1].name, "000000_000001");
        assert_eq!(rows[1].name, "000001");
        assert_eq!(rows[1].sprites[0].name, "000001_000000");
        assert_eq!(rows[1].sprites[0].region, SpriteRegion::new(0, 10, 4, 4));
    }

    #[test]
    fn test_row_layout_negative_tolerance() {
        let options = ExportOptions { row_tolerance: Some(-1), ..Default::default() };
        assert!(matches!(layout(&regions(), &options), Err(ExportError::Config(_))));
    }

    #[test]
    fn test_check_field_name() {
        let options = ExportOptions { field_name: "  ".to_string(), ..Default::default() };
        assert!(check_field_name(&options).is_err());
        assert!(check_field_name(&ExportOptions::default()).is_ok());
    }
}
