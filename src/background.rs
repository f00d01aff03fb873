//! Background color estimation strategies
//!
//! The scanner compares every pixel against a single background sample. The
//! strategy that picks the sample is a trait so alternatives can be swapped
//! in without changing the scan logic.

use image::RgbaImage;
use std::collections::HashMap;

/// Picks the background color sample for a sheet
///
/// Implementations receive a non-empty image (the scanner rejects
/// zero-dimension images before estimating) and return an RGB triple;
/// alpha is never part of the sample.
pub trait BackgroundEstimator {
    fn estimate(&self, img: &RgbaImage) -> [u8; 3];
}

/// Image corner to sample from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Single-pixel corner sample, the original tool's heuristic
///
/// No averaging or fallback: if the chosen corner sits on card artwork the
/// sample is unrepresentative and the scan flags it downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerEstimator {
    pub corner: Corner,
}

impl CornerEstimator {
    pub fn new(corner: Corner) -> Self {
        Self { corner }
    }
}

impl BackgroundEstimator for CornerEstimator {
    fn estimate(&self, img: &RgbaImage) -> [u8; 3] {
        let (w, h) = img.dimensions();
        let (x, y) = match self.corner {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (w - 1, 0),
            Corner::BottomLeft => (0, h - 1),
            Corner::BottomRight => (w - 1, h - 1),
        };
        let px = img.get_pixel(x, y).0;
        [px[0], px[1], px[2]]
    }
}

/// Mode of all border pixels
///
/// More robust than a single corner when cards touch an edge of the sheet.
/// Ties are broken towards the smallest RGB triple so the result is
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderModeEstimator;

impl BackgroundEstimator for BorderModeEstimator {
    fn estimate(&self, img: &RgbaImage) -> [u8; 3] {
        let (w, h) = img.dimensions();
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

        let mut tally = |x: u32, y: u32| {
            let px = img.get_pixel(x, y).0;
            *counts.entry([px[0], px[1], px[2]]).or_insert(0) += 1;
        };

        for x in 0..w {
            tally(x, 0);
            if h > 1 {
                tally(x, h - 1);
            }
        }
        for y in 1..h.saturating_sub(1) {
            tally(0, y);
            if w > 1 {
                tally(w - 1, y);
            }
        }

        counts
            .into_iter()
            .max_by(|(ca, na), (cb, nb)| na.cmp(nb).then_with(|| cb.cmp(ca)))
            .map(|(color, _)| color)
            .unwrap_or([0, 0, 0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_corner_estimator_default_top_left() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));

        let est = CornerEstimator::default();
        assert_eq!(est.estimate(&img), [10, 20, 30]);
    }

    #[test]
    fn test_corner_estimator_other_corners() {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 0, Rgba([1, 0, 0, 255]));
        img.put_pixel(0, 2, Rgba([2, 0, 0, 255]));
        img.put_pixel(3, 2, Rgba([3, 0, 0, 255]));

        assert_eq!(
            CornerEstimator::new(Corner::TopRight).estimate(&img),
            [1, 0, 0]
        );
        assert_eq!(
            CornerEstimator::new(Corner::BottomLeft).estimate(&img),
            [2, 0, 0]
        );
        assert_eq!(
            CornerEstimator::new(Corner::BottomRight).estimate(&img),
            [3, 0, 0]
        );
    }

    #[test]
    fn test_corner_estimator_ignores_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 0]));
        assert_eq!(CornerEstimator::default().estimate(&img), [9, 9, 9]);
    }

    #[test]
    fn test_border_mode_dominant_color_wins() {
        // White border with one dark corner pixel
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));

        assert_eq!(BorderModeEstimator.estimate(&img), [255, 255, 255]);
    }

    #[test]
    fn test_border_mode_ignores_interior() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([200, 200, 200, 255]));
        // Fill interior with a different color; border should still win
        for y in 1..4 {
            for x in 1..4 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }

        assert_eq!(BorderModeEstimator.estimate(&img), [200, 200, 200]);
    }

    #[test]
    fn test_border_mode_single_pixel_image() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([7, 8, 9, 255]));
        assert_eq!(BorderModeEstimator.estimate(&img), [7, 8, 9]);
    }
}
