//! JSON export format.
//!
//! # Output Format
//!
//! Flat layout, one object per sprite:
//!
//! ```json
//! [
//!   {
//!     "Name": "000000",
//!     "Frame": { "X": 0, "Y": 2, "Width": 4, "Height": 6 },
//!     "Duration": 1
//!   }
//! ]
//! ```
//!
//! Grouped layout, one object per row:
//!
//! ```json
//! [
//!   {
//!     "Name": "000000",
//!     "Loop": true,
//!     "Frames": [
//!       { "Name": "000000_000000", "Frame": { "X": 0, "Y": 2, "Width": 4, "Height": 6 }, "Duration": 1 }
//!     ]
//!   }
//! ]
//! ```
//!
//! The `Frame` key is configurable through [`ExportOptions::field_name`].

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::export::{
    check_field_name, layout, ExportOptions, Exporter, Layout, NamedSprite, Result,
};
use crate::region::SpriteRegion;

/// One sprite entry. Keys are written in declaration order with a dynamic
/// name for the coordinate block.
struct JsonSprite<'a> {
    sprite: &'a NamedSprite,
    field_name: &'a str,
    duration: u32,
}

impl Serialize for JsonSprite<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("Name", &self.sprite.name)?;
        map.serialize_entry(self.field_name, &self.sprite.region)?;
        map.serialize_entry("Duration", &self.duration)?;
        map.end()
    }
}

fn json_sprite<'a>(sprite: &'a NamedSprite, options: &'a ExportOptions) -> JsonSprite<'a> {
    JsonSprite { sprite, field_name: options.field_name.as_str(), duration: options.duration }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct JsonRow<'a> {
    name: &'a str,
    r#loop: bool,
    frames: Vec<JsonSprite<'a>>,
}

/// JSON format exporter.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
        let json =
            if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
        Ok(json)
    }
}

impl Exporter for JsonExporter {
    fn export_to_string(
        &self,
        regions: &[SpriteRegion],
        options: &ExportOptions,
    ) -> Result<String> {
        check_field_name(options)?;

        match layout(regions, options)? {
            Layout::Flat(sprites) => {
                let entries: Vec<JsonSprite> =
                    sprites.iter().map(|s| json_sprite(s, options)).collect();
                Self::render(&entries, options.pretty)
            }
            Layout::Rows(rows) => {
                let entries: Vec<JsonRow> = rows
                    .iter()
                    .map(|row| JsonRow {
                        name: &row.name,
                        r#loop: options.looping,
                        frames: row.sprites.iter().map(|s| json_sprite(s, options)).collect(),
                    })
                    .collect();
                Self::render(&entries, options.pretty)
            }
        }
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Export regions to a JSON file.
///
/// Convenience function for simple export use cases.
pub fn export_json(
    regions: &[SpriteRegion],
    output_path: &std::path::Path,
    options: &ExportOptions,
) -> Result<()> {
    JsonExporter::new().export(regions, output_path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use tempfile::TempDir;

    fn regions() -> Vec<SpriteRegion> {
        vec![
            SpriteRegion::new(0, 2, 4, 6),
            SpriteRegion::new(10, 2, 4, 6),
            SpriteRegion::new(-1, 20, 3, 3),
        ]
    }

    #[test]
    fn test_json_exporter_new() {
        let exporter = JsonExporter::new();
        assert_eq!(exporter.format_name(), "json");
        assert_eq!(exporter.extension(), "json");
    }

    #[test]
    fn test_flat_export() {
        let json =
            JsonExporter::new().export_to_string(&regions(), &ExportOptions::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = parsed.as_array().expect("top level array");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["Name"], "000000");
        assert_eq!(items[0]["Frame"]["X"], 0);
        assert_eq!(items[0]["Frame"]["Y"], 2);
        assert_eq!(items[0]["Frame"]["Width"], 4);
        assert_eq!(items[0]["Frame"]["Height"], 6);
        assert_eq!(items[0]["Duration"], 1);
        assert_eq!(items[2]["Frame"]["X"], -1);
    }

    #[test]
    fn test_key_order() {
        let options = ExportOptions { pretty: false, ..Default::default() };
        let json = JsonExporter::new().export_to_string(&regions()[..1], &options).unwrap();
        assert_eq!(
            json,
            r#"[{"Name":"000000","Frame":{"X":0,"Y":2,"Width":4,"Height":6},"Duration":1}]"#
        );
    }

    #[test]
    fn test_custom_field_name_and_duration() {
        let options =
            ExportOptions { field_name: "Rect".to_string(), duration: 100, ..Default::default() };
        let json = JsonExporter::new().export_to_string(&regions(), &options).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["Rect"]["X"], 10);
        assert!(parsed[1].get("Frame").is_none());
        assert_eq!(parsed[1]["Duration"], 100);
    }

    #[test]
    fn test_grouped_export() {
        let options = ExportOptions { row_tolerance: Some(0), ..Default::default() };
        let json = JsonExporter::new().export_to_string(&regions(), &options).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], "000000");
        assert_eq!(rows[0]["Loop"], true);
        assert_eq!(rows[0]["Frames"].as_array().unwrap().len(), 2);
        assert_eq!(rows[0]["Frames"][1]["Name"], "000000_000001");
        assert_eq!(rows[1]["Frames"][0]["Name"], "000001_000000");
        assert_eq!(rows[1]["Frames"][0]["Frame"]["Y"], 20);
    }

    #[test]
    fn test_grouped_loop_flag() {
        let options =
            ExportOptions { row_tolerance: Some(0), looping: false, ..Default::default() };
        let json = JsonExporter::new().export_to_string(&regions(), &options).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["Loop"], false);
    }

    #[test]
    fn test_empty_regions() {
        let options = ExportOptions { pretty: false, ..Default::default() };
        assert_eq!(JsonExporter::new().export_to_string(&[], &options).unwrap(), "[]");
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let options = ExportOptions { field_name: String::new(), ..Default::default() };
        let err = JsonExporter::new().export_to_string(&regions(), &options).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_export_creates_directories() {
        let temp = TempDir::new().unwrap();
        let output_path = temp.path().join("nested/dir/sprites.json");

        export_json(&regions(), &output_path, &ExportOptions::default()).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains('\n')); // Pretty printed
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
    }
}
