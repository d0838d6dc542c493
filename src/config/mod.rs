//! Configuration for spritecut
//!
//! Provides types and parsing for `spritecut.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
