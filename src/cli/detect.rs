//! Detect command implementation
//!
//! Prints raw bounding boxes in (Y, X) order, before row grouping.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::detect::RegionDetector;
use crate::export::sprite_name;
use crate::input::load_grid_limited;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the detect command
pub fn run_detect(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    json: bool,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let transparency = match config.slice_options() {
        Ok(o) => o.transparency(),
        Err(e) => {
            eprintln!("Error: invalid mask color: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let grid = match load_grid_limited(input, config.detect.max_pixels) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let regions = RegionDetector::new(transparency).detect_sorted(&grid);

    if json {
        match serde_json::to_string_pretty(&regions) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!(
        "{}: {}x{}, {} sprites",
        input.display(),
        grid.width(),
        grid.height(),
        regions.len()
    );
    for (i, region) in regions.iter().enumerate() {
        println!("  {}  {}", sprite_name(i), region);
    }

    ExitCode::from(EXIT_SUCCESS)
}
