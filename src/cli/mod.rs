//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod detect;
mod slice;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{check, load_config, merge_cli_overrides, CliOverrides, SpritecutConfig};
use crate::export::ExportFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spritecut - slice sprite sheets into frame rectangles
#[derive(Parser)]
#[command(name = "spritecut")]
#[command(about = "Spritecut - detect sprites in a sheet, group them into rows, and export frames")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect, group and normalize sprites, then export them as JSON or XML
    Slice {
        /// Input image (PNG or any format the image decoder supports)
        input: PathBuf,

        /// Output file. Use "-" for stdout.
        /// If omitted: {input_dir}/{input_stem}.{json|xml}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: json, or the config value)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Background color as hex (#RGB, #RGBA, #RRGGBB, #RRGGBBAA).
        /// Without it, fully transparent pixels are background.
        #[arg(short, long)]
        mask: Option<String>,

        /// Maximum Y difference for two sprites to share a row
        #[arg(short, long, allow_negative_numbers = true)]
        tolerance: Option<i32>,

        /// Keep raw bounding boxes instead of unifying sizes per row
        #[arg(long)]
        no_normalize: bool,

        /// Group sprites by row in the output
        #[arg(long)]
        rows: bool,

        /// Name of the coordinate block for each sprite (default: Frame)
        #[arg(long)]
        field_name: Option<String>,

        /// Duration value written for each sprite (default: 1)
        #[arg(long)]
        duration: Option<u32>,

        /// Write compact output without indentation
        #[arg(long)]
        compact: bool,

        /// Config file (default: nearest spritecut.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List raw sprite bounding boxes without grouping or normalization
    Detect {
        /// Input image
        input: PathBuf,

        /// Background color as hex; fully transparent pixels otherwise
        #[arg(short, long)]
        mask: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Config file (default: nearest spritecut.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Load the config file, apply CLI overrides and validate the result.
///
/// Prints the problem and returns the exit code on failure.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SpritecutConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    merge_cli_overrides(&mut config, overrides);

    if let Err(e) = check(&config) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slice {
            input,
            output,
            format,
            mask,
            tolerance,
            no_normalize,
            rows,
            field_name,
            duration,
            compact,
            config,
        } => {
            let overrides = CliOverrides {
                mask,
                y_tolerance: tolerance,
                normalize: no_normalize.then_some(false),
                format,
                field_name,
                duration,
                group_rows: rows.then_some(true),
                pretty: compact.then_some(false),
            };
            slice::run_slice(&input, output.as_deref(), config.as_deref(), &overrides)
        }
        Commands::Detect { input, mask, json, config } => {
            let overrides = CliOverrides { mask, ..Default::default() };
            detect::run_detect(&input, config.as_deref(), &overrides, json)
        }
    }
}
