//! Connected-component detection over a pixel grid.
//!
//! Every non-background pixel belongs to exactly one 8-connected component,
//! and each component is reported as its bounding box. Holes inside a
//! component stay inside the box: a region is a rectangle, not a pixel mask.
//!
//! Cells are scanned column by column (X outer, Y inner). Each unvisited
//! foreground cell seeds a breadth-first fill. The fill marks every neighbor
//! it examines as visited, background or not, so no cell is looked at twice
//! as a fill target and total work is linear in the grid area.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::pixel::{PixelGrid, Transparency};
use crate::region::{sort_row_major, SpriteRegion};

/// 8-connected neighbor offsets.
const NEIGHBORS: [(isize, isize); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Counters gathered during one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectStats {
    /// Cells marked visited. Always equals the grid area.
    pub visited: usize,
    /// Connected components found.
    pub components: usize,
    /// Largest number of cells waiting in the fill queue at once.
    pub peak_queue: usize,
}

/// Visited flags for one detection pass.
struct VisitedMask {
    width: usize,
    cells: Vec<bool>,
    marked: usize,
}

impl VisitedMask {
    fn new(width: usize, height: usize) -> Self {
        Self { width, cells: vec![false; width * height], marked: 0 }
    }

    fn is_marked(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Mark a cell. Returns false if it was already marked.
    fn mark(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.cells[y * self.width + x];
        if *cell {
            return false;
        }
        *cell = true;
        self.marked += 1;
        true
    }
}

/// Running min/max of a component's foreground cells.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl Extent {
    fn at(x: usize, y: usize) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_region(self) -> SpriteRegion {
        SpriteRegion::from_extent(
            self.min_x as i32,
            self.min_y as i32,
            self.max_x as i32,
            self.max_y as i32,
        )
    }
}

/// Finds sprite bounding boxes in a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionDetector {
    transparency: Transparency,
}

impl RegionDetector {
    pub fn new(transparency: Transparency) -> Self {
        Self { transparency }
    }

    pub fn transparency(&self) -> Transparency {
        self.transparency
    }

    /// Detect regions in scan order (column-major by seed cell).
    pub fn detect(&self, grid: &PixelGrid) -> Vec<SpriteRegion> {
        self.detect_with_stats(grid).0
    }

    /// Detect regions and return them sorted by (Y, X).
    pub fn detect_sorted(&self, grid: &PixelGrid) -> Vec<SpriteRegion> {
        let mut regions = self.detect(grid);
        sort_row_major(&mut regions);
        regions
    }

    /// Detect regions in scan order, also returning pass counters.
    pub fn detect_with_stats(&self, grid: &PixelGrid) -> (Vec<SpriteRegion>, DetectStats) {
        let (width, height) = (grid.width(), grid.height());
        let mut visited = VisitedMask::new(width, height);
        // Worst case every cell is queued once
        let mut queue: VecDeque<(usize, usize)> = VecDeque::with_capacity(grid.area());
        let mut regions = Vec::new();
        let mut peak_queue = 0;

        for x in 0..width {
            for y in 0..height {
                if visited.is_marked(x, y) {
                    continue;
                }
                visited.mark(x, y);
                if self.transparency.is_background(grid.at(x, y)) {
                    continue;
                }

                let mut extent = Extent::at(x, y);
                queue.push_back((x, y));

                while let Some((cx, cy)) = queue.pop_front() {
                    for (dx, dy) in NEIGHBORS {
                        let (Some(nx), Some(ny)) =
                            (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                        else {
                            continue;
                        };
                        if nx >= width || ny >= height || !visited.mark(nx, ny) {
                            continue;
                        }
                        if self.transparency.is_background_rgb(grid.at(nx, ny)) {
                            continue;
                        }
                        extent.include(nx, ny);
                        queue.push_back((nx, ny));
                    }
                    peak_queue = peak_queue.max(queue.len());
                }

                let region = extent.to_region();
                trace!("detect: component {} seeded at ({}, {}) -> {}", regions.len(), x, y, region);
                regions.push(region);
            }
        }

        let stats =
            DetectStats { visited: visited.marked, components: regions.len(), peak_queue };
        debug!(
            "detect: {} regions in {}x{} grid ({} cells visited)",
            stats.components, width, height, stats.visited
        );
        (regions, stats)
    }
}

/// Detect regions with the given background rule, in scan order.
pub fn detect(grid: &PixelGrid, transparency: Transparency) -> Vec<SpriteRegion> {
    RegionDetector::new(transparency).detect(grid)
}

/// Detect regions with the given background rule, sorted by (Y, X).
pub fn detect_sorted(grid: &PixelGrid, transparency: Transparency) -> Vec<SpriteRegion> {
    RegionDetector::new(transparency).detect_sorted(grid)
}
