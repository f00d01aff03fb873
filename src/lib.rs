//! cardgrid - Card grid detector for sprite-sheet images
//!
//! Detects a grid of card images embedded in a sprite sheet by scanning for
//! background-colored rows and columns, estimating the number of card rows
//! and columns, and reporting a count per category.
//!
//! # Features
//!
//! - **Grid Scanning** ([`scanner`]) - Background-fraction profiles and
//!   foreground run detection over rows and columns
//! - **Background Estimation** ([`background`]) - Pluggable background
//!   sampling strategies (corner pixel, border mode)
//! - **Reporting** ([`report`]) - Human-readable per-sheet reports
//! - **Batch Driver** ([`batch`]) - Per-category scanning with aggregated
//!   totals
//! - **Configuration** ([`config`]) - TOML config with CLI override merging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cardgrid::{GridScanner, ScanOptions};
//! use std::path::Path;
//!
//! let scanner = GridScanner::new(ScanOptions::default());
//! let scan = scanner.scan_path(Path::new("/tmp/action_cards.png"))?;
//! println!("{} rows × {} cols", scan.row_count(), scan.col_count());
//! # Ok::<(), cardgrid::ScanError>(())
//! ```

pub mod background;
pub mod batch;
pub mod cli;
pub mod config;
pub mod report;
pub mod scanner;

// Re-exports for convenience
pub use background::{BackgroundEstimator, BorderModeEstimator, Corner, CornerEstimator};
pub use batch::{
    BatchOptions, BatchSummary, SheetBatch, DEFAULT_CATEGORIES, DEFAULT_PATH_TEMPLATE,
};
pub use cli::{category_name, create_progress_bar, Cli, Commands, ExitCode, ScanArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use report::{estimated_total_line, SheetReport};
pub use scanner::{
    GridScanner, MatchMode, ScanError, ScanOptions, ScanOptionsBuilder, SheetScan,
    DEFAULT_THRESHOLD, DEFAULT_TOLERANCE,
};
