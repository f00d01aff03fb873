//! Grid scanning module
//!
//! Detects card rows and columns in a sprite sheet by measuring, for every
//! pixel row and column, the fraction of pixels that match the sheet's
//! background color. Rows/columns above the threshold are background;
//! maximal runs of foreground rows are card rows, and transitions into
//! foreground along the x axis mark card column starts.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::background::{BackgroundEstimator, CornerEstimator};

/// Default background fraction above which a row or column is background
pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Default per-channel tolerance for `MatchMode::Tolerance`
pub const DEFAULT_TOLERANCE: u8 = 8;

/// Scan error types
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// How a pixel is compared against the background sample
///
/// `Exact` reproduces the original tool's component-wise equality. It is
/// deliberately brittle against anti-aliasing and compression artifacts:
/// a row with slightly varying pixels scores a lower background fraction.
/// `Tolerance` is the documented relaxation for lossy sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Component-wise equality with the background sample
    #[default]
    Exact,
    /// Per-channel distance at most `ScanOptions::tolerance`
    Tolerance,
}

/// Scan options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOptions {
    /// Background fraction threshold, strict `>` comparison
    pub threshold: f64,
    /// Pixel matching mode
    pub match_mode: MatchMode,
    /// Per-channel tolerance, only used in `MatchMode::Tolerance`
    pub tolerance: u8,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            match_mode: MatchMode::Exact,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ScanOptions {
    /// Create a new options builder
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Create options for lossy sources (JPEG screenshots etc.)
    pub fn lenient() -> Self {
        Self {
            match_mode: MatchMode::Tolerance,
            ..Default::default()
        }
    }
}

/// Builder for ScanOptions
#[derive(Debug, Default)]
pub struct ScanOptionsBuilder {
    options: ScanOptions,
}

impl ScanOptionsBuilder {
    /// Set the background fraction threshold (clamped to 0.0-1.0)
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.options.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the pixel matching mode
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.options.match_mode = mode;
        self
    }

    /// Set the per-channel tolerance and switch to tolerance matching
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.options.tolerance = tolerance;
        self.options.match_mode = MatchMode::Tolerance;
        self
    }

    /// Build the options
    pub fn build(self) -> ScanOptions {
        self.options
    }
}

/// Result of scanning one sheet
///
/// `row_starts`/`row_ends` hold the y positions of transitions into and out
/// of foreground; their lengths differ by at most one, the surplus start
/// being a run still open when the image ends. `col_starts` holds only the
/// transitions into foreground along x, computed over the whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetScan {
    pub width: u32,
    pub height: u32,
    /// Background sample (RGB, alpha ignored)
    pub background: [u8; 3],
    pub row_starts: Vec<u32>,
    pub row_ends: Vec<u32>,
    pub col_starts: Vec<u32>,
    /// Number of pixel rows classified as background
    pub background_rows: usize,
}

impl SheetScan {
    /// Number of detected card rows
    pub fn row_count(&self) -> usize {
        self.row_starts.len()
    }

    /// Number of detected card columns
    pub fn col_count(&self) -> usize {
        self.col_starts.len()
    }

    /// Estimated card count for this sheet (rows x columns)
    pub fn estimated_cards(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Whether the last row run was still open when the image ended
    pub fn has_unclosed_row(&self) -> bool {
        self.row_starts.len() > self.row_ends.len()
    }

    /// Whether the background sample classified at least one full row
    ///
    /// When this is false the sample was probably unrepresentative (the
    /// corner pixel sat on card artwork) and the counts are suspect.
    pub fn background_detected(&self) -> bool {
        self.background_rows > 0
    }
}

/// Card grid scanner
///
/// The background sampling strategy is injected so that the default
/// corner-pixel heuristic can be swapped without touching the scan logic.
pub struct GridScanner {
    options: ScanOptions,
    estimator: Box<dyn BackgroundEstimator>,
}

impl Default for GridScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl GridScanner {
    /// Create a scanner with the default corner-pixel background estimator
    pub fn new(options: ScanOptions) -> Self {
        Self::with_estimator(options, Box::new(CornerEstimator::default()))
    }

    /// Create a scanner with a custom background estimator
    pub fn with_estimator(options: ScanOptions, estimator: Box<dyn BackgroundEstimator>) -> Self {
        Self { options, estimator }
    }

    /// Get the scan options
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Load an image from disk and scan it
    pub fn scan_path(&self, path: &Path) -> Result<SheetScan> {
        if !path.exists() {
            return Err(ScanError::ImageNotFound(path.to_path_buf()));
        }

        let img = image::open(path).map_err(|e| ScanError::InvalidImage(e.to_string()))?;
        self.scan_image(&img.to_rgba8())
    }

    /// Scan an RGBA image already in memory
    pub fn scan_image(&self, img: &RgbaImage) -> Result<SheetScan> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::EmptyImage { width, height });
        }

        let background = self.estimator.estimate(img);

        // Row and column background fractions
        let mut row_whiteness = Vec::with_capacity(height as usize);
        for y in 0..height {
            let matches = (0..width)
                .filter(|&x| self.is_background_pixel(background, img.get_pixel(x, y).0))
                .count();
            row_whiteness.push(matches as f64 / width as f64);
        }

        let mut col_whiteness = Vec::with_capacity(width as usize);
        for x in 0..width {
            let matches = (0..height)
                .filter(|&y| self.is_background_pixel(background, img.get_pixel(x, y).0))
                .count();
            col_whiteness.push(matches as f64 / height as f64);
        }

        let row_classes: Vec<bool> = row_whiteness
            .iter()
            .map(|&ws| ws > self.options.threshold)
            .collect();
        let col_classes: Vec<bool> = col_whiteness
            .iter()
            .map(|&cs| cs > self.options.threshold)
            .collect();

        let (row_starts, row_ends) = foreground_runs(&row_classes);
        let (col_starts, _) = foreground_runs(&col_classes);
        let background_rows = row_classes.iter().filter(|&&bg| bg).count();

        Ok(SheetScan {
            width,
            height,
            background,
            row_starts,
            row_ends,
            col_starts,
            background_rows,
        })
    }

    fn is_background_pixel(&self, background: [u8; 3], pixel: [u8; 4]) -> bool {
        let rgb = [pixel[0], pixel[1], pixel[2]];
        match self.options.match_mode {
            MatchMode::Exact => rgb == background,
            MatchMode::Tolerance => rgb
                .iter()
                .zip(background.iter())
                .all(|(&a, &b)| a.abs_diff(b) <= self.options.tolerance),
        }
    }
}

/// Find foreground run boundaries in a background/foreground classification
///
/// The scan starts in background state, so a foreground first entry opens a
/// run at position 0. A run still open at the end is left unclosed.
fn foreground_runs(classes: &[bool]) -> (Vec<u32>, Vec<u32>) {
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut prev_is_bg = true;

    for (i, &is_bg) in classes.iter().enumerate() {
        if prev_is_bg && !is_bg {
            starts.push(i as u32);
        }
        if !prev_is_bg && is_bg {
            ends.push(i as u32);
        }
        prev_is_bg = is_bg;
    }

    (starts, ends)
}
