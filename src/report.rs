//! Per-sheet report formatting
//!
//! Renders one human-readable report per category: header, image dimensions
//! and background sample, row run spans, column starts and the estimated
//! card total.

use std::fmt;

use crate::scanner::SheetScan;

/// Maximum number of column start positions listed in a report
pub const MAX_LISTED_COLUMNS: usize = 10;

/// Formats a scan result for console output
#[derive(Debug)]
pub struct SheetReport<'a> {
    name: &'a str,
    scan: &'a SheetScan,
}

impl<'a> SheetReport<'a> {
    pub fn new(name: &'a str, scan: &'a SheetScan) -> Self {
        Self { name, scan }
    }
}

impl fmt::Display for SheetReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = self.scan;
        let [r, g, b] = scan.background;

        writeln!(f, "=== {} ===", self.name.to_uppercase())?;
        writeln!(
            f,
            "Image: {}×{}px, bg=({}, {}, {})",
            scan.width, scan.height, r, g, b
        )?;

        writeln!(f, "Card ROWS: {}", scan.row_count())?;
        for (i, (&start, &end)) in scan.row_starts.iter().zip(&scan.row_ends).enumerate() {
            writeln!(
                f,
                "  Row {}: y={}-{} (h={}px)",
                i + 1,
                start,
                end,
                end - start
            )?;
        }
        if scan.has_unclosed_row() {
            // Trailing run never transitioned back to background
            let last = scan.row_starts[scan.row_starts.len() - 1];
            writeln!(
                f,
                "  Row {}: y={}-{} (unclosed)",
                scan.row_starts.len(),
                last,
                scan.height
            )?;
        }

        let listed: Vec<u32> = scan
            .col_starts
            .iter()
            .take(MAX_LISTED_COLUMNS)
            .copied()
            .collect();
        writeln!(
            f,
            "Card COLUMNS detected: {} → {:?}",
            scan.col_count(),
            listed
        )?;

        if !scan.background_detected() {
            writeln!(
                f,
                "  WARNING: background sample matched no full row; counts are suspect"
            )?;
        }

        Ok(())
    }
}

/// Format the estimated total line for one category
pub fn estimated_total_line(name: &str, scan: &SheetScan) -> String {
    format!(
        "  ESTIMATED TOTAL {}: {} rows × {} cols = {} cards",
        name,
        scan.row_count(),
        scan.col_count(),
        scan.estimated_cards()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scan() -> SheetScan {
        SheetScan {
            width: 400,
            height: 300,
            background: [255, 255, 255],
            row_starts: vec![10, 160],
            row_ends: vec![140, 290],
            col_starts: vec![20, 150, 280],
            background_rows: 40,
        }
    }

    #[test]
    fn test_report_format() {
        let scan = sample_scan();
        let report = SheetReport::new("action", &scan).to_string();

        assert!(report.contains("=== ACTION ==="));
        assert!(report.contains("Image: 400×300px, bg=(255, 255, 255)"));
        assert!(report.contains("Card ROWS: 2"));
        assert!(report.contains("  Row 1: y=10-140 (h=130px)"));
        assert!(report.contains("  Row 2: y=160-290 (h=130px)"));
        assert!(report.contains("Card COLUMNS detected: 3 → [20, 150, 280]"));
        assert!(!report.contains("WARNING"));
        assert!(!report.contains("unclosed"));
    }

    #[test]
    fn test_report_unclosed_row() {
        let mut scan = sample_scan();
        scan.row_ends.pop();
        let report = SheetReport::new("money", &scan).to_string();

        assert!(report.contains("  Row 1: y=10-140 (h=130px)"));
        assert!(report.contains("  Row 2: y=160-300 (unclosed)"));
    }

    #[test]
    fn test_report_background_warning() {
        let mut scan = sample_scan();
        scan.background_rows = 0;
        let report = SheetReport::new("wild", &scan).to_string();

        assert!(report.contains("WARNING"));
    }

    #[test]
    fn test_report_lists_first_ten_columns() {
        let mut scan = sample_scan();
        scan.col_starts = (0..15).map(|i| i * 10).collect();
        let report = SheetReport::new("property", &scan).to_string();

        assert!(report.contains("Card COLUMNS detected: 15"));
        assert!(report.contains("[0, 10, 20, 30, 40, 50, 60, 70, 80, 90]"));
    }

    #[test]
    fn test_estimated_total_line() {
        let scan = sample_scan();
        assert_eq!(
            estimated_total_line("action", &scan),
            "  ESTIMATED TOTAL action: 2 rows × 3 cols = 6 cards"
        );
    }
}
