//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for mismatched
//! sheets, bad geometry, and unreadable sources.

use image::{DynamicImage, RgbaImage};
use spritemover::{FrameExtractor, GridGeometry, SourceImage, SpriteError};

fn blank_sheet(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
}

#[test]
fn width_mismatch() {
    let geometry = GridGeometry::new(4, 100, 50).expect("valid geometry");
    let result = FrameExtractor::new(geometry).extract(&blank_sheet(399, 50));

    match result {
        Err(SpriteError::GeometryMismatch {
            expected_width,
            expected_height,
            actual_width,
            actual_height,
        }) => {
            assert_eq!((expected_width, expected_height), (400, 50));
            assert_eq!((actual_width, actual_height), (399, 50));
        }
        other => panic!("Expected GeometryMismatch, got: {other:?}"),
    }
}

#[test]
fn height_mismatch() {
    let geometry = GridGeometry::new(4, 100, 50).expect("valid geometry");
    let result = FrameExtractor::new(geometry).extract(&blank_sheet(400, 51));
    assert!(result.is_err_and(|error| error.is_geometry_mismatch()));
}

#[test]
fn transposed_sheet_is_rejected() {
    // A vertical strip of the right area is still the wrong shape.
    let geometry = GridGeometry::new(4, 100, 100).expect("valid geometry");
    let result = FrameExtractor::new(geometry).extract(&blank_sheet(100, 400));
    assert!(result.is_err_and(|error| error.is_geometry_mismatch()));
}

#[test]
fn mismatch_message() {
    let geometry = GridGeometry::new(10, 567, 567).expect("valid geometry");
    let error = FrameExtractor::new(geometry)
        .validate(&blank_sheet(567, 567))
        .unwrap_err();

    let error_message = error.to_string();
    assert!(
        error_message.contains("5670x567px"),
        "Error message should mention the expected size: {error_message}",
    );
    assert!(
        error_message.contains("567x567px"),
        "Error message should mention the actual size: {error_message}",
    );
}

#[test]
fn validate_accepts_exact_size() {
    let geometry = GridGeometry::new(3, 16, 20).expect("valid geometry");
    assert!(FrameExtractor::new(geometry).validate(&blank_sheet(48, 20)).is_ok());
}

#[test]
fn invalid_geometry_message() {
    let error = GridGeometry::new(31, 64, 64).unwrap_err();
    let error_message = error.to_string();
    assert!(
        error_message.contains("frame count") && error_message.contains("31"),
        "Error should name the field and value: {error_message}",
    );
}

#[test]
fn open_nonexistent_file() {
    let result = SourceImage::open("this_file_does_not_exist.png");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open sprite sheet"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn open_unsupported_extension() {
    let result = SourceImage::open("notes.txt");
    assert!(matches!(result, Err(SpriteError::UnsupportedFormat(_))));
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.png");
    std::fs::write(&invalid_file_path, b"this is not an image")
        .expect("Failed to write invalid file");

    let result = SourceImage::open(&invalid_file_path);
    assert!(
        matches!(result, Err(SpriteError::FileOpen { .. })),
        "Expected FileOpen error for invalid image",
    );
}

#[test]
fn invalid_bytes() {
    let result = SourceImage::from_bytes(b"garbage", Some("upload.png".to_string()));
    assert!(matches!(result, Err(SpriteError::ImageError(_))));
}
