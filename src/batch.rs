//! Batch driver
//!
//! Runs the scanner once per named category and accumulates estimated card
//! totals. Sheets are processed one at a time on the calling thread; each
//! image is loaded, scanned and released before the next. A failed sheet is
//! recorded and reported, and the remaining categories still run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::scanner::{GridScanner, ScanError, ScanOptions, SheetScan};

/// Category names scanned by default, in order
pub const DEFAULT_CATEGORIES: [&str; 4] = ["action", "money", "property", "wild"];

/// Default sheet path template; `{name}` is replaced by the category name
pub const DEFAULT_PATH_TEMPLATE: &str = "/tmp/{name}_cards.png";

/// Batch options
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Ordered category names
    pub categories: Vec<String>,
    /// Path template with a `{name}` placeholder
    pub path_template: String,
    /// Explicit per-category paths, taking precedence over the template
    pub paths: BTreeMap<String, PathBuf>,
    /// Scanner options shared by every sheet
    pub scan: ScanOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
            paths: BTreeMap::new(),
            scan: ScanOptions::default(),
        }
    }
}

impl BatchOptions {
    /// Resolve the sheet path for a category
    pub fn sheet_path(&self, name: &str) -> PathBuf {
        match self.paths.get(name) {
            Some(path) => path.clone(),
            None => PathBuf::from(self.path_template.replace("{name}", name)),
        }
    }
}

/// Aggregated results of one batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Estimated card count per successfully scanned category
    pub totals: BTreeMap<String, usize>,
    /// Categories whose sheet could not be scanned
    pub failures: Vec<(String, ScanError)>,
}

impl BatchSummary {
    /// Total estimated cards across all categories
    pub fn total_cards(&self) -> usize {
        self.totals.values().sum()
    }

    /// Print a summary block to stdout
    pub fn print_summary(&self) {
        println!();
        println!("=== Summary ===");
        println!(
            "Sheets: {} ok, {} failed",
            self.totals.len(),
            self.failures.len()
        );
        for (name, total) in &self.totals {
            println!("  {}: {} cards", name, total);
        }
        for (name, err) in &self.failures {
            println!("  {}: FAILED ({})", name, err);
        }
        println!("Total estimated cards: {}", self.total_cards());
    }
}

/// Runs the grid scanner over a fixed set of category sheets
pub struct SheetBatch {
    options: BatchOptions,
    scanner: GridScanner,
}

impl SheetBatch {
    pub fn new(options: BatchOptions) -> Self {
        let scanner = GridScanner::new(options.scan);
        Self { options, scanner }
    }

    /// Get the batch options
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Run the batch, invoking `on_sheet` after each category
    ///
    /// The callback receives the category name and the scan outcome, letting
    /// the caller print reports without the driver owning any output policy.
    pub fn run_with<F>(&self, mut on_sheet: F) -> BatchSummary
    where
        F: FnMut(&str, &Result<SheetScan, ScanError>),
    {
        let mut summary = BatchSummary::default();

        for name in &self.options.categories {
            let path = self.options.sheet_path(name);
            let result = self.scanner.scan_path(&path);
            on_sheet(name, &result);

            match result {
                Ok(scan) => {
                    summary.totals.insert(name.clone(), scan.estimated_cards());
                }
                Err(err) => summary.failures.push((name.clone(), err)),
            }
        }

        summary
    }

    /// Run the batch without per-sheet output
    pub fn run(&self) -> BatchSummary {
        self.run_with(|_, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn write_sheet(path: &Path, cards_x: u32, cards_y: u32) {
        // 20px cards on a 10px white grid
        let w = cards_x * 30 + 10;
        let h = cards_y * 30 + 10;
        let mut img = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
        for cy in 0..cards_y {
            for cx in 0..cards_x {
                for y in 0..20 {
                    for x in 0..20 {
                        img.put_pixel(cx * 30 + 10 + x, cy * 30 + 10 + y, Rgba([0, 0, 0, 255]));
                    }
                }
            }
        }
        img.save(path).unwrap();
    }

    #[test]
    fn test_default_options() {
        let opts = BatchOptions::default();
        assert_eq!(opts.categories, DEFAULT_CATEGORIES);
        assert_eq!(opts.path_template, DEFAULT_PATH_TEMPLATE);
        assert!(opts.paths.is_empty());
    }

    #[test]
    fn test_sheet_path_from_template() {
        let opts = BatchOptions::default();
        assert_eq!(
            opts.sheet_path("action"),
            PathBuf::from("/tmp/action_cards.png")
        );
    }

    #[test]
    fn test_sheet_path_explicit_override() {
        let mut opts = BatchOptions::default();
        opts.paths
            .insert("wild".to_string(), PathBuf::from("/data/wild.png"));
        assert_eq!(opts.sheet_path("wild"), PathBuf::from("/data/wild.png"));
        assert_eq!(
            opts.sheet_path("money"),
            PathBuf::from("/tmp/money_cards.png")
        );
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        write_sheet(&good, 3, 2);

        let mut opts = BatchOptions {
            categories: vec!["missing".to_string(), "good".to_string()],
            ..Default::default()
        };
        opts.paths
            .insert("missing".to_string(), dir.path().join("missing.png"));
        opts.paths.insert("good".to_string(), good);

        let batch = SheetBatch::new(opts);
        let summary = batch.run();

        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "missing");
        assert!(matches!(
            summary.failures[0].1,
            ScanError::ImageNotFound(_)
        ));
        assert_eq!(summary.totals.get("good"), Some(&6));
        assert_eq!(summary.total_cards(), 6);
    }

    #[test]
    fn test_batch_callback_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_sheet(&a, 2, 2);
        write_sheet(&b, 4, 1);

        let mut opts = BatchOptions {
            categories: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        opts.paths.insert("a".to_string(), a);
        opts.paths.insert("b".to_string(), b);

        let mut seen = Vec::new();
        let batch = SheetBatch::new(opts);
        let summary = batch.run_with(|name, result| {
            seen.push((name.to_string(), result.is_ok()));
        });

        assert_eq!(
            seen,
            vec![("a".to_string(), true), ("b".to_string(), true)]
        );
        assert_eq!(summary.totals.get("a"), Some(&4));
        assert_eq!(summary.totals.get("b"), Some(&4));
        assert_eq!(summary.total_cards(), 8);
    }
}
