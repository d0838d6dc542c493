//! Decoding images into pixel grids.
//!
//! Slicing itself never touches files. This is the caller-side step the CLI
//! uses to turn a PNG (or any format the `image` crate reads) into a
//! [`PixelGrid`].

use std::path::Path;

use thiserror::Error;

use crate::error::SliceError;
use crate::pixel::PixelGrid;

/// Error raised while loading an input image.
#[derive(Debug, Error)]
pub enum InputError {
    /// The image could not be opened or decoded
    #[error("Failed to open image '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// The image is larger than allowed
    #[error(transparent)]
    Limit(#[from] SliceError),
}

/// Decode an image file into a grid.
pub fn load_grid(path: &Path) -> Result<PixelGrid, InputError> {
    load_grid_limited(path, None)
}

/// Decode an image file into a grid, rejecting images above `max_pixels`.
pub fn load_grid_limited(path: &Path, max_pixels: Option<u64>) -> Result<PixelGrid, InputError> {
    let decode_error =
        |source| InputError::Decode { path: path.display().to_string(), source };

    // Only the header is read here, so oversized sheets are rejected before decoding
    if let Some(limit) = max_pixels {
        let (width, height) = image::image_dimensions(path).map_err(decode_error)?;
        let pixels = u64::from(width) * u64::from(height);
        if pixels > limit {
            return Err(SliceError::TooLarge { pixels, limit }.into());
        }
    }

    let img = image::open(path).map_err(decode_error)?;

    log::debug!("input: decoded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(PixelGrid::from_rgba_image(&img.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path) -> std::path::PathBuf {
        let mut img = RgbaImage::new(4, 3);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let path = dir.join("sheet.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_grid() {
        let temp = TempDir::new().unwrap();
        let grid = load_grid(&write_png(temp.path())).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.get(2, 1), Some(Pixel::rgb(10, 20, 30)));
        assert_eq!(grid.get(0, 0), Some(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_load_grid_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_grid(&temp.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, InputError::Decode { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_load_grid_limit() {
        let temp = TempDir::new().unwrap();
        let path = write_png(temp.path());
        let err = load_grid_limited(&path, Some(11)).unwrap_err();
        assert!(matches!(err, InputError::Limit(SliceError::TooLarge { pixels: 12, limit: 11 })));
        assert!(load_grid_limited(&path, Some(12)).is_ok());
    }

    #[test]
    fn test_load_grid_limit_checked_before_decode() {
        let temp = TempDir::new().unwrap();
        let mut img = RgbaImage::new(64, 64);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 7) as u8, (y * 13) as u8, (x ^ y) as u8, 255]);
        }
        let path = temp.path().join("truncated.png");
        img.save(&path).unwrap();

        // Keep the header but cut the pixel data short
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let err = load_grid_limited(&path, Some(100)).unwrap_err();
        assert!(matches!(
            err,
            InputError::Limit(SliceError::TooLarge { pixels: 4096, limit: 100 })
        ));
        assert!(matches!(load_grid(&path).unwrap_err(), InputError::Decode { .. }));
    }
}
