//! Pixel grids and the background test used by detection.
//!
//! A [`PixelGrid`] is indexed `(x, y)`: the first coordinate is the column,
//! the second the row. Background is decided by a [`Transparency`] rule,
//! either the alpha channel or an exact mask color.

use image::RgbaImage;

use crate::error::SliceError;

/// A single RGBA8 sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    fn same_rgb(&self, other: &Pixel) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(c: [u8; 4]) -> Self {
        Pixel::new(c[0], c[1], c[2], c[3])
    }
}

impl From<image::Rgba<u8>> for Pixel {
    fn from(c: image::Rgba<u8>) -> Self {
        Pixel::from(c.0)
    }
}

/// Rule deciding which pixels count as background.
///
/// Two comparison sets exist. The cell scan in [`crate::detect`] uses
/// [`Transparency::is_background`], which compares all four channels
/// against the mask. The flood-fill neighbor test uses
/// [`Transparency::is_background_rgb`], which ignores alpha. With a mask
/// whose alpha differs from the image's, a pixel can be foreground to the
/// scan but background to the fill. Existing outputs depend on this, so
/// both call sites keep their own test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    /// Background is any pixel with alpha 0.
    #[default]
    Alpha,
    /// Background is any pixel matching this color exactly.
    Mask(Pixel),
}

impl Transparency {
    pub fn from_mask(mask: Option<Pixel>) -> Self {
        match mask {
            Some(color) => Transparency::Mask(color),
            None => Transparency::Alpha,
        }
    }

    /// Background test used by the top-level scan (R, G, B and A).
    pub fn is_background(&self, pixel: Pixel) -> bool {
        match self {
            Transparency::Alpha => pixel.is_transparent(),
            Transparency::Mask(mask) => pixel == *mask,
        }
    }

    /// Background test used for flood-fill neighbors (R, G and B only).
    pub fn is_background_rgb(&self, pixel: Pixel) -> bool {
        match self {
            Transparency::Alpha => pixel.is_transparent(),
            Transparency::Mask(mask) => pixel.same_rgb(mask),
        }
    }
}

/// A width x height array of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    // Row-major storage
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a grid filled with transparent pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Create a grid where every cell holds `pixel`.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `width * height` cells cannot be
    /// allocated. Use [`PixelGrid::from_pixels`] for untrusted dimensions.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self { width, height, pixels: vec![pixel; width.saturating_mul(height)] }
    }

    /// Build a grid from row-major pixel data.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, SliceError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(SliceError::GridSizeMismatch { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Copy a decoded image into a grid.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let pixels = img.pixels().map(|p| Pixel::from(*p)).collect();
        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = pixel;
        }
    }

    /// Fill the rectangle `[x, x+w) x [y, y+h)`, clipped to the grid.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, pixel: Pixel) {
        for py in y..y.saturating_add(h).min(self.height) {
            for px in x..x.saturating_add(w).min(self.width) {
                self.pixels[py * self.width + px] = pixel;
            }
        }
    }

    // Callers guarantee bounds.
    pub(crate) fn at(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_background() {
        let t = Transparency::Alpha;
        assert!(t.is_background(Pixel::new(10, 20, 30, 0)));
        assert!(!t.is_background(Pixel::new(10, 20, 30, 1)));
        assert!(t.is_background_rgb(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_mask_compares_rgba_on_scan() {
        let t = Transparency::Mask(Pixel::rgb(255, 0, 255));
        assert!(t.is_background(Pixel::rgb(255, 0, 255)));
        // Same RGB, different alpha: not background for the scan
        assert!(!t.is_background(Pixel::new(255, 0, 255, 128)));
        // Fully transparent is foreground when a mask is set
        assert!(!t.is_background(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_mask_ignores_alpha_in_fill() {
        let t = Transparency::Mask(Pixel::rgb(255, 0, 255));
        assert!(t.is_background_rgb(Pixel::new(255, 0, 255, 128)));
        assert!(t.is_background_rgb(Pixel::new(255, 0, 255, 0)));
        assert!(!t.is_background_rgb(Pixel::rgb(255, 0, 254)));
    }

    #[test]
    fn test_from_mask() {
        assert_eq!(Transparency::from_mask(None), Transparency::Alpha);
        let m = Pixel::rgb(1, 2, 3);
        assert_eq!(Transparency::from_mask(Some(m)), Transparency::Mask(m));
    }

    #[test]
    fn test_grid_indexing_is_column_then_row() {
        let mut grid = PixelGrid::new(3, 2);
        grid.set(2, 1, Pixel::rgb(9, 9, 9));
        assert_eq!(grid.get(2, 1), Some(Pixel::rgb(9, 9, 9)));
        assert_eq!(grid.get(1, 2), None);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_from_pixels_size_mismatch() {
        let err = PixelGrid::from_pixels(2, 2, vec![Pixel::TRANSPARENT; 3]).unwrap_err();
        assert_eq!(err, SliceError::GridSizeMismatch { width: 2, height: 2, len: 3 });
    }

    #[test]
    fn test_zero_area_grid() {
        let grid = PixelGrid::new(0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.get(0, 0), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut grid = PixelGrid::new(4, 4);
        grid.fill_rect(2, 2, 10, 10, Pixel::rgb(1, 1, 1));
        assert_eq!(grid.get(3, 3), Some(Pixel::rgb(1, 1, 1)));
        assert_eq!(grid.get(1, 1), Some(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_fill_rect_huge_extent_clips() {
        let mut grid = PixelGrid::new(4, 3);
        grid.fill_rect(1, 0, usize::MAX, 1, Pixel::rgb(9, 9, 9));
        assert_eq!(grid.get(0, 0), Some(Pixel::TRANSPARENT));
        assert_eq!(grid.get(3, 0), Some(Pixel::rgb(9, 9, 9)));
        assert_eq!(grid.get(1, 1), Some(Pixel::TRANSPARENT));

        grid.fill_rect(usize::MAX, usize::MAX, 2, 2, Pixel::rgb(1, 1, 1));
        grid.fill_rect(0, 2, 1, usize::MAX, Pixel::rgb(2, 2, 2));
        assert_eq!(grid.get(0, 2), Some(Pixel::rgb(2, 2, 2)));
    }

    #[test]
    fn test_from_pixels_overflowing_dimensions() {
        let err = PixelGrid::from_pixels(usize::MAX, 2, Vec::new()).unwrap_err();
        assert_eq!(err, SliceError::GridSizeMismatch { width: usize::MAX, height: 2, len: 0 });
        // Message formatting must not overflow either
        assert!(err.to_string().contains("has 0 entries"));
    }

    #[test]
    fn test_from_rgba_image() {
        let mut img = RgbaImage::new(2, 3);
        img.put_pixel(1, 2, image::Rgba([5, 6, 7, 8]));
        let grid = PixelGrid::from_rgba_image(&img);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 2), Some(Pixel::new(5, 6, 7, 8)));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Pixel::new(255, 0, 16, 128).to_hex(), "#FF001080");
    }
}
