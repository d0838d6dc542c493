//! End-to-end slicing: detect, group, normalize, flatten.

use log::debug;

use crate::detect::RegionDetector;
use crate::error::SliceError;
use crate::pixel::{Pixel, PixelGrid, Transparency};
use crate::region::SpriteRegion;
use crate::rows::{flatten_rows, group_by_row, normalize_rows, Row};

/// Options for one slicing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceOptions {
    /// Exact background color; `None` means alpha 0 is background.
    pub mask: Option<Pixel>,
    /// Maximum Y difference for two sprites to share a row.
    pub y_tolerance: i32,
    /// Unify sprite sizes within each row.
    pub normalize: bool,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self { mask: None, y_tolerance: 0, normalize: true }
    }
}

impl SliceOptions {
    pub fn transparency(&self) -> Transparency {
        Transparency::from_mask(self.mask)
    }
}

/// Detect sprites and return them grouped by row.
///
/// Rows come back in creation order, members in (Y, X) order of their raw
/// detections. When `options.normalize` is set, each row is normalized.
pub fn slice_rows(grid: &PixelGrid, options: &SliceOptions) -> Result<Vec<Row>, SliceError> {
    if options.y_tolerance < 0 {
        return Err(SliceError::NegativeTolerance(options.y_tolerance));
    }

    let regions = RegionDetector::new(options.transparency()).detect_sorted(grid);
    let mut rows = group_by_row(&regions, options.y_tolerance)?;
    if options.normalize {
        normalize_rows(&mut rows);
    }
    Ok(rows)
}

/// Detect sprites and return the flattened list sorted by (Y, X).
pub fn slice(grid: &PixelGrid, options: &SliceOptions) -> Result<Vec<SpriteRegion>, SliceError> {
    let rows = slice_rows(grid, options)?;
    let row_count = rows.len();
    let regions = flatten_rows(rows);
    debug!("slice: {} sprites across {} rows", regions.len(), row_count);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Pixel = Pixel::rgb(0, 0, 0);

    fn two_sprite_grid() -> PixelGrid {
        let mut grid = PixelGrid::new(20, 10);
        grid.fill_rect(0, 0, 4, 4, INK);
        grid.fill_rect(10, 2, 4, 6, INK);
        grid
    }

    #[test]
    fn test_default_options() {
        let options = SliceOptions::default();
        assert_eq!(options.mask, None);
        assert_eq!(options.y_tolerance, 0);
        assert!(options.normalize);
        assert_eq!(options.transparency(), Transparency::Alpha);
    }

    #[test]
    fn test_negative_tolerance_fails_before_detection() {
        let options = SliceOptions { y_tolerance: -2, ..Default::default() };
        assert_eq!(
            slice(&two_sprite_grid(), &options).unwrap_err(),
            SliceError::NegativeTolerance(-2)
        );
    }

    #[test]
    fn test_same_row_is_normalized() {
        let options = SliceOptions { y_tolerance: 2, ..Default::default() };
        let regions = slice(&two_sprite_grid(), &options).unwrap();
        assert_eq!(
            regions,
            vec![SpriteRegion::new(0, 2, 4, 6), SpriteRegion::new(10, 2, 4, 6)]
        );
    }

    #[test]
    fn test_normalize_disabled_keeps_raw_boxes() {
        let options = SliceOptions { y_tolerance: 2, normalize: false, ..Default::default() };
        let regions = slice(&two_sprite_grid(), &options).unwrap();
        assert_eq!(
            regions,
            vec![SpriteRegion::new(0, 0, 4, 4), SpriteRegion::new(10, 2, 4, 6)]
        );
    }

    #[test]
    fn test_slice_rows_keeps_grouping() {
        let options = SliceOptions { y_tolerance: 1, ..Default::default() };
        let rows = slice_rows(&two_sprite_grid(), &options).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].regions(), &[SpriteRegion::new(0, 0, 4, 4)]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = PixelGrid::new(0, 0);
        assert!(slice(&grid, &SliceOptions::default()).unwrap().is_empty());
    }
}
