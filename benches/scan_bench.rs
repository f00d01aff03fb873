//! Benchmarks for the cardgrid scanner
//!
//! Run with: cargo bench

use cardgrid::{GridScanner, ScanOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};

/// Build a white sheet with a grid of black cards
fn sheet(cards_x: u32, cards_y: u32, card: u32, gap: u32) -> RgbaImage {
    let w = cards_x * (card + gap) + gap;
    let h = cards_y * (card + gap) + gap;
    let mut img = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    for cy in 0..cards_y {
        for cx in 0..cards_x {
            for y in 0..card {
                for x in 0..card {
                    img.put_pixel(
                        cx * (card + gap) + gap + x,
                        cy * (card + gap) + gap + y,
                        Rgba([0, 0, 0, 255]),
                    );
                }
            }
        }
    }
    img
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_image");
    let scanner = GridScanner::new(ScanOptions::default());

    for &cards in &[2u32, 5, 10] {
        let img = sheet(cards, cards, 60, 12);
        group.bench_with_input(BenchmarkId::new("exact", cards), &img, |b, img| {
            b.iter(|| black_box(scanner.scan_image(img).unwrap()))
        });
    }

    let lenient = GridScanner::new(ScanOptions::lenient());
    let img = sheet(5, 5, 60, 12);
    group.bench_with_input(BenchmarkId::new("tolerance", 5), &img, |b, img| {
        b.iter(|| black_box(lenient.scan_image(img).unwrap()))
    });

    group.finish();
}

fn bench_option_builders(c: &mut Criterion) {
    c.bench_function("ScanOptions::builder", |b| {
        b.iter(|| black_box(ScanOptions::builder().threshold(0.85).tolerance(4).build()))
    });
}

criterion_group!(benches, bench_scan, bench_option_builders);
criterion_main!(benches);
