//! XML export format.
//!
//! # Output Format
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <Spritesheet>
//!   <Sprite Name="000000" Duration="1">
//!     <Frame X="0" Y="2" Width="4" Height="6" />
//!   </Sprite>
//! </Spritesheet>
//! ```
//!
//! With rows grouped, sprites are wrapped in `<Animation Name=".." Loop="..">`
//! elements. The `Frame` element name comes from
//! [`ExportOptions::field_name`] and must be a valid XML name.

use crate::export::{
    check_field_name, layout, ExportError, ExportOptions, Exporter, Layout, NamedSprite, Result,
};
use crate::region::SpriteRegion;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// XML format exporter.
#[derive(Debug, Default)]
pub struct XmlExporter;

impl XmlExporter {
    /// Create a new XML exporter.
    pub fn new() -> Self {
        Self
    }

    fn write_sprite(
        out: &mut XmlWriter,
        sprite: &NamedSprite,
        options: &ExportOptions,
        depth: usize,
    ) {
        out.line(
            depth,
            &format!(
                r#"<Sprite Name="{}" Duration="{}">"#,
                escape_attr(&sprite.name),
                options.duration
            ),
        );
        out.line(depth + 1, &frame_element(&options.field_name, &sprite.region));
        out.line(depth, "</Sprite>");
    }
}

impl Exporter for XmlExporter {
    fn export_to_string(
        &self,
        regions: &[SpriteRegion],
        options: &ExportOptions,
    ) -> Result<String> {
        check_field_name(options)?;
        if !is_xml_name(&options.field_name) {
            return Err(ExportError::Config(format!(
                "'{}' is not a valid XML element name",
                options.field_name
            )));
        }

        let mut out = XmlWriter::new(options.pretty);
        out.line(0, XML_DECLARATION);
        out.line(0, "<Spritesheet>");

        match layout(regions, options)? {
            Layout::Flat(sprites) => {
                for sprite in &sprites {
                    Self::write_sprite(&mut out, sprite, options, 1);
                }
            }
            Layout::Rows(rows) => {
                for row in &rows {
                    out.line(
                        1,
                        &format!(
                            r#"<Animation Name="{}" Loop="{}">"#,
                            escape_attr(&row.name),
                            options.looping
                        ),
                    );
                    for sprite in &row.sprites {
                        Self::write_sprite(&mut out, sprite, options, 2);
                    }
                    out.line(1, "</Animation>");
                }
            }
        }

        out.line(0, "</Spritesheet>");
        Ok(out.finish())
    }

    fn format_name(&self) -> &'static str {
        "xml"
    }

    fn extension(&self) -> &'static str {
        "xml"
    }
}

/// Line-oriented writer that indents by two spaces when pretty printing.
struct XmlWriter {
    content: String,
    pretty: bool,
}

impl XmlWriter {
    fn new(pretty: bool) -> Self {
        Self { content: String::new(), pretty }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if self.pretty {
            self.content.push_str(&"  ".repeat(depth));
        }
        self.content.push_str(text);
        if self.pretty {
            self.content.push('\n');
        }
    }

    fn finish(self) -> String {
        self.content
    }
}

fn frame_element(field_name: &str, region: &SpriteRegion) -> String {
    format!(
        r#"<{} X="{}" Y="{}" Width="{}" Height="{}" />"#,
        field_name, region.x, region.y, region.width, region.height
    )
}

/// Whether `name` can be used as an element name.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    if name.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml")) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Escape a string for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Export regions to an XML file.
pub fn export_xml(
    regions: &[SpriteRegion],
    output_path: &std::path::Path,
    options: &ExportOptions,
) -> Result<()> {
    XmlExporter::new().export(regions, output_path, options)
}
