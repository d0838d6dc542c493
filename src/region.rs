//! Sprite bounding boxes.

use serde::Serialize;

/// Axis-aligned bounding box of one sprite, in grid coordinates.
///
/// Coordinates are signed: row normalization may move an origin left of or
/// above the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpriteRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SpriteRegion {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a region from inclusive min/max corners.
    pub fn from_extent(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    /// One past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl std::fmt::Display for SpriteRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

/// Sort regions top to bottom, then left to right.
pub fn sort_row_major(regions: &mut [SpriteRegion]) {
    regions.sort_by_key(|r| (r.y, r.x));
}
