//! Slice command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::export::ExportError;
use crate::input::load_grid_limited;
use crate::pipeline::slice;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Default output path: the input's directory and stem with the format extension.
fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.parent().unwrap_or(Path::new(".")).join(format!("{}.{}", stem, extension))
}

/// Bad export options are argument errors; everything else is a runtime error.
fn export_failure(error: &ExportError) -> ExitCode {
    match error {
        ExportError::Config(_) => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Execute the slice command
pub fn run_slice(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let options = match config.slice_options() {
        Ok(o) => o,
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

    let regions = match slice(&grid, &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let exporter = config.export.format.exporter();
    let export_options = config.export_options();

    if output == Some(Path::new("-")) {
        return match exporter.export_to_string(&regions, &export_options) {
            Ok(content) => {
                print!("{}", content);
                if !content.ends_with('\n') {
                    println!();
                }
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                export_failure(&e)
            }
        };
    }

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, exporter.extension()));

    if let Err(e) = exporter.export(&regions, &output_path, &export_options) {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return export_failure(&e);
    }

    println!(
        "Sliced: {} ({}x{}, {} sprites, {})",
        output_path.display(),
        grid.width(),
        grid.height(),
        regions.len(),
        exporter.format_name()
    );

    ExitCode::from(EXIT_SUCCESS)
}
