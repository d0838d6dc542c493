//! Hex color parsing for mask colors
//!
//! Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`. The leading `#` is
//! optional so that `--mask FF00FF` works without shell quoting.

use thiserror::Error;

use crate::pixel::Pixel;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into a pixel.
///
/// Colors without an alpha component are opaque.
///
/// ```
/// use spritecut::color::parse_hex_color;
/// use spritecut::pixel::Pixel;
///
/// assert_eq!(parse_hex_color("#F0F").unwrap(), Pixel::rgb(255, 0, 255));
/// assert_eq!(parse_hex_color("ff00ff80").unwrap(), Pixel::new(255, 0, 255, 128));
/// ```
pub fn parse_hex_color(s: &str) -> Result<Pixel, ColorError> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }

    let digits = hex.chars().map(parse_hex_digit).collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // Short forms double each digit
        [r, g, b] => Ok(Pixel::rgb(r * 17, g * 17, b * 17)),
        [r, g, b, a] => Ok(Pixel::new(r * 17, g * 17, b * 17, a * 17)),
        [r1, r0, g1, g0, b1, b0] => Ok(Pixel::rgb(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Pixel::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}
