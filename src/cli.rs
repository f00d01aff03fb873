//! CLI interface module
//!
//! Provides command-line interface using clap derive macros.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Exit codes for the CLI
///
/// These codes follow standard Unix conventions and provide
/// specific error categories for scripting and automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArgs = 2,
    /// No sheet image found at any configured path
    InputNotFound = 3,
    /// One or more sheets failed to scan
    ProcessingError = 4,
}

impl ExitCode {
    /// Convert to process exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Get human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::InvalidArgs => "Invalid arguments",
            ExitCode::InputNotFound => "No sheet image found",
            ExitCode::ProcessingError => "One or more sheets failed to scan",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

/// Card grid detector for sprite-sheet images
#[derive(Parser, Debug)]
#[command(name = "cardgrid")]
#[command(version)]
#[command(about = "Card grid detector for sprite-sheet images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan sheet images and report detected card grids
    Scan(ScanArgs),
    /// Show version and configuration information
    Info,
}

/// Arguments for the scan command
#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Sheet images to scan (defaults to the configured categories)
    pub sheets: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Background fraction threshold (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Per-channel background tolerance (enables tolerance matching)
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Sheet path template with a {name} placeholder
    #[arg(long)]
    pub template: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-sheet reports and summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Show execution plan without scanning
    #[arg(long)]
    pub dry_run: bool,
}

/// Derive a category name from a sheet file path
///
/// Uses the file stem with a trailing `_cards` suffix stripped, so
/// `/tmp/action_cards.png` and `/data/action.png` both map to `action`.
pub fn category_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    stem.strip_suffix("_cards").unwrap_or(&stem).to_string()
}

/// Create a styled progress bar for sheet processing
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb
}
