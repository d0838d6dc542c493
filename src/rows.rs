//! Row grouping and per-row normalization.
//!
//! Regions are clustered into rows by Y tolerance: a region joins the first
//! row that has *any* member whose Y is within the tolerance of its own.
//! Membership is never re-evaluated, so a row built incrementally can chain
//! across a vertical span wider than twice the tolerance, so frames drifting
//! slowly down the sheet stay in one row.

use log::debug;

use crate::error::SliceError;
use crate::region::{sort_row_major, SpriteRegion};

/// Regions sharing approximately the same Y, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    regions: Vec<SpriteRegion>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions(regions: Vec<SpriteRegion>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[SpriteRegion] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<SpriteRegion> {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn push(&mut self, region: SpriteRegion) {
        self.regions.push(region);
    }

    /// Whether any member's Y is within `tolerance` of `y`.
    pub fn accepts(&self, y: i32, tolerance: i32) -> bool {
        self.regions.iter().any(|r| (r.y - y).abs() <= tolerance)
    }

    /// Unify every member to the row's largest width and height.
    ///
    /// Bottom edges are aligned to the lowest bottom in the row and each
    /// sprite is widened around its center (truncating division). Origins may
    /// end up negative or outside the image; nothing is clamped.
    pub fn normalize(&mut self) {
        let Some(max_width) = self.regions.iter().map(|r| r.width).max() else {
            return;
        };
        let max_height = self.regions.iter().map(|r| r.height).max().unwrap_or(0);
        let max_bottom = self.regions.iter().map(SpriteRegion::bottom).max().unwrap_or(0);
        let new_y = max_bottom - max_height;

        for slot in &mut self.regions {
            let old = *slot;
            let y_offset = old.y - new_y;
            let x_offset = (max_width - old.width) / 2;
            *slot = SpriteRegion::new(old.x - x_offset, old.y - y_offset, max_width, max_height);
        }
    }
}

/// Cluster regions into rows.
///
/// Regions are taken in the given order (normally sorted by Y then X). Each
/// one joins the first row, in creation order, that has a member within
/// `y_tolerance` of its Y; otherwise it starts a new row.
pub fn group_by_row(regions: &[SpriteRegion], y_tolerance: i32) -> Result<Vec<Row>, SliceError> {
    if y_tolerance < 0 {
        return Err(SliceError::NegativeTolerance(y_tolerance));
    }

    let mut rows: Vec<Row> = Vec::new();
    for &region in regions {
        match rows.iter_mut().find(|row| row.accepts(region.y, y_tolerance)) {
            Some(row) => row.push(region),
            None => rows.push(Row::from_regions(vec![region])),
        }
    }

    debug!(
        "rows: {} regions grouped into {} rows (tolerance {})",
        regions.len(),
        rows.len(),
        y_tolerance
    );
    Ok(rows)
}

/// Normalize every row in place.
pub fn normalize_rows(rows: &mut [Row]) {
    for row in rows.iter_mut() {
        row.normalize();
    }
}

/// Concatenate rows and sort the result by (Y, X).
pub fn flatten_rows(rows: Vec<Row>) -> Vec<SpriteRegion> {
    let mut regions: Vec<SpriteRegion> = rows.into_iter().flat_map(Row::into_regions).collect();
    sort_row_major(&mut regions);
    regions
}
