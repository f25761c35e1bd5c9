//! Frame extraction integration tests.
//!
//! Sheets are generated in memory: every pixel encodes its own source
//! coordinates, so a frame's content can be traced back to its column.

use std::sync::{Arc, Mutex};

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use spritemover::{
    CancellationToken, ExtractOptions, FrameEncoding, FrameExtractor, GridGeometry,
    OperationType, PixelFormat, ProgressCallback, ProgressInfo, SpriteError,
};

fn coordinate_pixel(x: u32, y: u32) -> Rgba<u8> {
    Rgba([(x % 256) as u8, (x / 256) as u8, (y % 256) as u8, 255])
}

fn coordinate_sheet(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, coordinate_pixel))
}

// ── Slicing ────────────────────────────────────────────────────────

#[test]
fn four_column_sheet() {
    let geometry = GridGeometry::new(4, 100, 50).expect("valid geometry");
    let sheet = coordinate_sheet(400, 50);

    let frames = FrameExtractor::new(geometry)
        .extract(&sheet)
        .expect("Failed to extract");

    assert_eq!(frames.len(), 4);
    for (index, frame) in frames.iter().enumerate() {
        assert_eq!(frame.index(), index);
        assert_eq!((frame.width(), frame.height()), (100, 50));
    }

    // Frame 0 covers columns [0, 100), frame 3 covers [300, 400).
    assert_eq!(frames[0].image().get_pixel(0, 0), coordinate_pixel(0, 0));
    assert_eq!(frames[0].image().get_pixel(99, 49), coordinate_pixel(99, 49));
    assert_eq!(frames[3].image().get_pixel(0, 0), coordinate_pixel(300, 0));
    assert_eq!(frames[3].image().get_pixel(99, 49), coordinate_pixel(399, 49));
}

#[test]
fn every_frame_matches_its_column() {
    let geometry = GridGeometry::new(6, 40, 24).expect("valid geometry");
    let sheet = coordinate_sheet(240, 24);

    let frames = FrameExtractor::new(geometry)
        .extract(&sheet)
        .expect("Failed to extract");

    for frame in &frames {
        let offset = frame.index() as u32 * 40;
        for (x, y, pixel) in frame.image().pixels() {
            assert_eq!(
                pixel,
                sheet.get_pixel(offset + x, y),
                "frame {} differs at ({x}, {y})",
                frame.index(),
            );
        }
    }
}

#[test]
fn single_frame_is_whole_sheet() {
    let geometry = GridGeometry::new(1, 64, 32).expect("valid geometry");
    let sheet = coordinate_sheet(64, 32);

    let frames = FrameExtractor::new(geometry)
        .extract(&sheet)
        .expect("Failed to extract");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].image().to_rgba8(), sheet.to_rgba8());
}

#[test]
fn wide_frames_past_256_pixels() {
    // x / 256 lands in the green channel, so wide columns are distinguishable.
    let geometry = GridGeometry::new(3, 300, 16).expect("valid geometry");
    let sheet = coordinate_sheet(900, 16);

    let frames = FrameExtractor::new(geometry)
        .extract(&sheet)
        .expect("Failed to extract");

    assert_eq!(frames[2].image().get_pixel(0, 0), coordinate_pixel(600, 0));
    assert_eq!(frames[2].image().get_pixel(299, 15), coordinate_pixel(899, 15));
}

#[test]
fn sequence_remembers_geometry() {
    let geometry = GridGeometry::new(2, 16, 16).expect("valid geometry");
    let frames = FrameExtractor::new(geometry)
        .extract(&coordinate_sheet(32, 16))
        .expect("Failed to extract");
    assert_eq!(frames.geometry(), &geometry);
    assert!(!frames.is_empty());
    assert_eq!(frames.into_frames().len(), 2);
}

// ── Encoding and pixel formats ───────────────────────────────────────

#[test]
fn default_encoding_is_png() {
    let geometry = GridGeometry::new(2, 20, 20).expect("valid geometry");
    let frames = FrameExtractor::new(geometry)
        .extract(&coordinate_sheet(40, 20))
        .expect("Failed to extract");

    let frame = &frames[1];
    assert_eq!(frame.encoding(), FrameEncoding::Png);
    let decoded = image::load_from_memory(frame.encoded()).expect("Failed to decode PNG");
    assert_eq!(decoded.to_rgba8(), frame.image().to_rgba8());
}

#[test]
fn bmp_encoding() {
    let geometry = GridGeometry::new(2, 20, 20).expect("valid geometry");
    let options = ExtractOptions::new().with_encoding(FrameEncoding::Bmp);
    let frames = FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(40, 20), &options)
        .expect("Failed to extract");

    assert_eq!(frames[0].encoding(), FrameEncoding::Bmp);
    assert_eq!(&frames[0].encoded()[..2], b"BM");
}

#[test]
fn rgb8_frames() {
    let geometry = GridGeometry::new(2, 20, 20).expect("valid geometry");
    let options = ExtractOptions::new().with_pixel_format(PixelFormat::Rgb8);
    let frames = FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(40, 20), &options)
        .expect("Failed to extract");

    assert!(
        matches!(frames[0].image(), DynamicImage::ImageRgb8(_)),
        "Expected RGB8 image",
    );
}

#[test]
fn gray8_frames() {
    let geometry = GridGeometry::new(2, 20, 20).expect("valid geometry");
    let options = ExtractOptions::new().with_pixel_format(PixelFormat::Gray8);
    let frames = FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(40, 20), &options)
        .expect("Failed to extract");

    assert!(
        matches!(frames[1].image(), DynamicImage::ImageLuma8(_)),
        "Expected Luma8 (grayscale) image",
    );
}

#[test]
fn rgb_source_becomes_rgba_by_default() {
    let geometry = GridGeometry::new(2, 16, 16).expect("valid geometry");
    let sheet = DynamicImage::ImageRgb8(image::RgbImage::new(32, 16));
    let frames = FrameExtractor::new(geometry)
        .extract(&sheet)
        .expect("Failed to extract");
    assert!(matches!(frames[0].image(), DynamicImage::ImageRgba8(_)));
}

// ── Progress and cancellation ────────────────────────────────────────

struct RecordingProgress {
    infos: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

#[test]
fn progress_reports_every_frame_and_finish() {
    let recorder = Arc::new(RecordingProgress {
        infos: Mutex::new(Vec::new()),
    });
    let options = ExtractOptions::new().with_progress(recorder.clone());
    let geometry = GridGeometry::new(5, 16, 16).expect("valid geometry");

    FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(80, 16), &options)
        .expect("Failed to extract");

    let infos = recorder.infos.lock().unwrap();
    // One per frame plus the final report.
    assert_eq!(infos.len(), 6);
    assert!(infos.iter().all(|info| info.operation == OperationType::FrameExtraction));
    assert!(infos.iter().all(|info| info.total == 5));
    assert_eq!(infos[0].current_frame, Some(0));
    let last = infos.last().unwrap();
    assert_eq!(last.current, 5);
    assert_eq!(last.current_frame, None);
    assert_eq!(last.percentage(), 100.0);
}

#[test]
fn progress_batch_size() {
    let recorder = Arc::new(RecordingProgress {
        infos: Mutex::new(Vec::new()),
    });
    let options = ExtractOptions::new()
        .with_progress(recorder.clone())
        .with_batch_size(2);
    let geometry = GridGeometry::new(5, 16, 16).expect("valid geometry");

    FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(80, 16), &options)
        .expect("Failed to extract");

    // After frames 2 and 4, then the final report.
    assert_eq!(recorder.infos.lock().unwrap().len(), 3);
}

#[test]
fn cancelled_extraction_returns_error() {
    let token = CancellationToken::new();
    token.cancel();
    let options = ExtractOptions::new().with_cancellation(token);
    let geometry = GridGeometry::new(3, 16, 16).expect("valid geometry");

    let result = FrameExtractor::new(geometry)
        .extract_with_options(&coordinate_sheet(48, 16), &options);

    match result {
        Err(SpriteError::Cancelled) => {}
        other => panic!("Expected Cancelled, got: {other:?}"),
    }
}

#[test]
fn for_each_frame_stops_on_callback_error() {
    let geometry = GridGeometry::new(4, 16, 16).expect("valid geometry");
    let mut seen = Vec::new();

    let result = FrameExtractor::new(geometry).for_each_frame_with_options(
        &coordinate_sheet(64, 16),
        &ExtractOptions::new(),
        |frame| {
            seen.push(frame.index());
            if frame.index() == 1 {
                Err(SpriteError::Cancelled)
            } else {
                Ok(())
            }
        },
    );

    assert!(matches!(result, Err(SpriteError::Cancelled)));
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn options_debug() {
    let options = ExtractOptions::new().with_batch_size(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("ExtractOptions"));
    assert!(debug.contains("has_cancellation: false"));
    // Clamped to 1.
    assert!(debug.contains("batch_size: 1"));
    assert_eq!(options.pixel_format(), PixelFormat::Rgba8);
    assert_eq!(options.encoding(), FrameEncoding::Png);
}
