//! Sprite sheet frame extraction.
//!
//! [`FrameExtractor`] checks a decoded sheet against its [`GridGeometry`] and
//! cuts it into a [`FrameSequence`], one frame per column, left to right.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, RgbaImage};
//! use spritemover::{FrameExtractor, GridGeometry};
//!
//! let sheet = DynamicImage::ImageRgba8(RgbaImage::new(400, 50));
//! let geometry = GridGeometry::new(4, 100, 50)?;
//!
//! let frames = FrameExtractor::new(geometry).extract(&sheet)?;
//! assert_eq!(frames.len(), 4);
//! assert_eq!(frames[3].width(), 100);
//! # Ok::<(), spritemover::SpriteError>(())
//! ```

use image::DynamicImage;

use crate::configuration::ExtractOptions;
use crate::error::SpriteError;
use crate::frame::{Frame, FrameSequence};
use crate::geometry::GridGeometry;
use crate::progress::{OperationType, ProgressTracker};

/// Slices single-row sprite sheets according to a fixed geometry.
///
/// The extractor holds nothing but its geometry; every call works only on
/// the image it is given and never touches previously produced frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameExtractor {
    geometry: GridGeometry,
}

impl FrameExtractor {
    /// Create an extractor for `geometry`.
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// The geometry this extractor slices with.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Check that `source` is exactly the size the geometry implies.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::GeometryMismatch`] carrying the expected and
    /// actual dimensions.
    pub fn validate(&self, source: &DynamicImage) -> Result<(), SpriteError> {
        let (expected_width, expected_height) = self.geometry.expected_dimensions();
        let (actual_width, actual_height) = (source.width(), source.height());

        if self.geometry.matches(actual_width, actual_height) {
            return Ok(());
        }

        log::warn!(
            "Sprite sheet is {}x{}, expected {}x{} ({})",
            actual_width,
            actual_height,
            expected_width,
            expected_height,
            self.geometry,
        );
        Err(SpriteError::GeometryMismatch {
            expected_width,
            expected_height,
            actual_width,
            actual_height,
        })
    }

    /// Cut `source` into frames with default options (RGBA8, PNG).
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::GeometryMismatch`] if the sheet has the wrong
    /// size, or [`SpriteError::EncodeError`] if a frame cannot be encoded.
    pub fn extract(&self, source: &DynamicImage) -> Result<FrameSequence, SpriteError> {
        self.extract_with_options(source, &ExtractOptions::default())
    }

    /// Cut `source` into frames with progress, cancellation, and output
    /// settings from `options`.
    ///
    /// Either every column is extracted or no sequence is returned at all.
    ///
    /// # Errors
    ///
    /// As [`extract`](FrameExtractor::extract), plus
    /// [`SpriteError::Cancelled`] if the cancellation token fires.
    pub fn extract_with_options(
        &self,
        source: &DynamicImage,
        options: &ExtractOptions,
    ) -> Result<FrameSequence, SpriteError> {
        let mut frames = Vec::with_capacity(self.geometry.frame_count() as usize);
        self.for_each_frame_with_options(source, options, |frame| {
            frames.push(frame);
            Ok(())
        })?;
        Ok(FrameSequence::new(frames, self.geometry))
    }

    /// Cut `source` column by column, handing each frame to `callback` as
    /// soon as it is encoded.
    ///
    /// Frames arrive in column order. An error from `callback` stops the
    /// loop and is returned unchanged.
    ///
    /// # Errors
    ///
    /// As [`extract_with_options`](FrameExtractor::extract_with_options),
    /// plus any error returned by `callback`.
    pub fn for_each_frame_with_options<F>(
        &self,
        source: &DynamicImage,
        options: &ExtractOptions,
        mut callback: F,
    ) -> Result<(), SpriteError>
    where
        F: FnMut(Frame) -> Result<(), SpriteError>,
    {
        self.validate(source)?;

        let frame_count = self.geometry.frame_count();
        log::debug!(
            "Extracting {} frames of {}x{} (format={:?}, encoding={})",
            frame_count,
            self.geometry.frame_width(),
            self.geometry.frame_height(),
            options.pixel_format,
            options.encoding,
        );

        let mut tracker = ProgressTracker::new(
            options.progress.clone(),
            OperationType::FrameExtraction,
            frame_count as u64,
            options.batch_size,
        );

        for index in 0..frame_count {
            if options.is_cancelled() {
                return Err(SpriteError::Cancelled);
            }
            callback(extract_column(source, &self.geometry, index, options)?)?;
            tracker.advance(u64::from(index));
        }

        tracker.finish();
        Ok(())
    }

    /// Cut `source` into frames, copying columns on rayon threads.
    ///
    /// The result is identical to [`extract_with_options`](FrameExtractor::extract_with_options):
    /// frames are re-ordered by column index before the sequence is built.
    ///
    /// # Errors
    ///
    /// As [`extract_with_options`](FrameExtractor::extract_with_options).
    #[cfg(feature = "rayon")]
    pub fn extract_parallel(
        &self,
        source: &DynamicImage,
        options: &ExtractOptions,
    ) -> Result<FrameSequence, SpriteError> {
        self.validate(source)?;
        let frames = crate::rayon::parallel_extract_columns(source, &self.geometry, options)?;
        Ok(FrameSequence::new(frames, self.geometry))
    }
}

/// Copy column `index` of `source` into a fresh surface and encode it.
///
/// The caller must already have validated `source` against `geometry`.
pub(crate) fn extract_column(
    source: &DynamicImage,
    geometry: &GridGeometry,
    index: u32,
    options: &ExtractOptions,
) -> Result<Frame, SpriteError> {
    let (x, y) = geometry.column_origin(index);
    let (width, height) = geometry.frame_dimensions();
    let surface = options.pixel_format.convert(source.crop_imm(x, y, width, height));
    Frame::encode(index as usize, surface, options.encoding)
}
