//! Rayon extraction tests (feature = "rayon").

#![cfg(feature = "rayon")]

use image::{DynamicImage, Rgba, RgbaImage};
use spritemover::{ExtractOptions, FrameExtractor, GridGeometry, SpriteError};

fn coordinate_sheet(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (x / 256) as u8, y as u8, 255])
    }))
}

#[test]
fn parallel_matches_sequential() {
    let geometry = GridGeometry::new(12, 48, 32).expect("valid geometry");
    let sheet = coordinate_sheet(576, 32);
    let extractor = FrameExtractor::new(geometry);
    let options = ExtractOptions::new();

    let sequential = extractor
        .extract_with_options(&sheet, &options)
        .expect("Failed sequential extraction");
    let parallel = extractor
        .extract_parallel(&sheet, &options)
        .expect("Failed parallel extraction");

    assert_eq!(parallel.len(), sequential.len());
    for (left, right) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(left.index(), right.index());
        assert_eq!(left.encoded(), right.encoded());
    }
}

#[test]
fn parallel_rejects_mismatch() {
    let geometry = GridGeometry::new(12, 48, 32).expect("valid geometry");
    let result = FrameExtractor::new(geometry).extract_parallel(&coordinate_sheet(100, 32), &ExtractOptions::new());
    assert!(matches!(result, Err(SpriteError::GeometryMismatch { .. })));
}
