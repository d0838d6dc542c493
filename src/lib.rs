//! Spritecut - Library for slicing sprite sheets into frame rectangles
//!
//! This library provides functionality to:
//! - Find every 8-connected sprite in an RGBA pixel grid
//! - Group sprites into animation rows by Y tolerance
//! - Unify frame sizes within each row (bottom-aligned, centered)
//! - Export the frames as JSON or XML
//!
//! Background is either fully transparent pixels or an exact mask color.
//! With a mask, the cell scan compares R, G, B and A while the flood fill
//! compares only R, G and B. A pixel that matches the mask's RGB but not its
//! alpha can therefore seed a sprite on its own yet be absorbed as background
//! when reached from a neighboring sprite. See [`pixel::Transparency`].
//!
//! ```
//! use spritecut::pipeline::{slice, SliceOptions};
//! use spritecut::pixel::{Pixel, PixelGrid};
//! use spritecut::region::SpriteRegion;
//!
//! let mut grid = PixelGrid::new(10, 10);
//! grid.fill_rect(2, 2, 2, 2, Pixel::rgb(255, 255, 255));
//!
//! let regions = slice(&grid, &SliceOptions::default()).unwrap();
//! assert_eq!(regions, vec![SpriteRegion::new(2, 2, 2, 2)]);
//! ```

pub mod cli;
pub mod color;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod pixel;
pub mod region;
pub mod rows;

pub use error::SliceError;
