//! Extraction configuration.
//!
//! [`ExtractOptions`] is a builder that threads progress callbacks,
//! cancellation tokens, and output settings through extraction methods
//! without polluting every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use spritemover::{
//!     CancellationToken, ExtractOptions, FrameEncoding, PixelFormat, ProgressCallback,
//!     ProgressInfo,
//! };
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let token = CancellationToken::new();
//! let options = ExtractOptions::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_cancellation(token.clone())
//!     .with_pixel_format(PixelFormat::Rgb8)
//!     .with_encoding(FrameEncoding::Bmp);
//! ```

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};

use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Pixel format of extracted frame surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 8-bit RGBA (32 bpp). This is the default, matching a 2D canvas.
    #[default]
    Rgba8,
    /// 8-bit RGB (24 bpp). Alpha is discarded.
    Rgb8,
    /// 8-bit grayscale (8 bpp).
    Gray8,
}

impl PixelFormat {
    /// Convert a decoded surface into this pixel format.
    pub(crate) fn convert(self, image: DynamicImage) -> DynamicImage {
        match (self, image) {
            (PixelFormat::Rgba8, image @ DynamicImage::ImageRgba8(_)) => image,
            (PixelFormat::Rgb8, image @ DynamicImage::ImageRgb8(_)) => image,
            (PixelFormat::Gray8, image @ DynamicImage::ImageLuma8(_)) => image,
            (PixelFormat::Rgba8, image) => DynamicImage::ImageRgba8(image.to_rgba8()),
            (PixelFormat::Rgb8, image) => DynamicImage::ImageRgb8(image.to_rgb8()),
            (PixelFormat::Gray8, image) => DynamicImage::ImageLuma8(image.to_luma8()),
        }
    }
}

/// Encoded still-image format stored alongside each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameEncoding {
    /// Portable Network Graphics. This is the default.
    #[default]
    Png,
    /// Windows bitmap.
    Bmp,
    /// Tagged Image File Format.
    Tiff,
}

impl FrameEncoding {
    /// Map to the corresponding `image` crate format.
    pub(crate) fn image_format(self) -> ImageFormat {
        match self {
            FrameEncoding::Png => ImageFormat::Png,
            FrameEncoding::Bmp => ImageFormat::Bmp,
            FrameEncoding::Tiff => ImageFormat::Tiff,
        }
    }

    /// MIME type of the encoded bytes, for presentation layers that need one.
    pub fn mime_type(self) -> &'static str {
        match self {
            FrameEncoding::Png => "image/png",
            FrameEncoding::Bmp => "image/bmp",
            FrameEncoding::Tiff => "image/tiff",
        }
    }
}

impl Display for FrameEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FrameEncoding::Png => write!(f, "PNG"),
            FrameEncoding::Bmp => write!(f, "BMP"),
            FrameEncoding::Tiff => write!(f, "TIFF"),
        }
    }
}

/// Configuration for extraction operations.
///
/// Carries optional progress-, cancellation-, and output-related settings.
/// Pass a reference to this struct to the `*_with_options` methods on
/// [`FrameExtractor`](crate::FrameExtractor), or hand it to a
/// [`SpriteAnimator`](crate::SpriteAnimator) via
/// [`with_options`](crate::SpriteAnimator::with_options).
///
/// A default-constructed value extracts RGBA8 frames encoded as PNG with no
/// progress reporting and no cancellation.
#[derive(Clone)]
pub struct ExtractOptions {
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
    /// Pixel format of the frame surfaces.
    pub(crate) pixel_format: PixelFormat,
    /// Encoded format of the frame bytes.
    pub(crate) encoding: FrameEncoding,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("has_progress", &true)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .field("pixel_format", &self.pixel_format)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
            pixel_format: PixelFormat::default(),
            encoding: FrameEncoding::default(),
        }
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every [`batch_size`](ExtractOptions::with_batch_size)
    /// frames and once more when extraction finishes.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, extraction stops before the next column
    /// and returns [`SpriteError::Cancelled`](crate::SpriteError::Cancelled).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the pixel format of extracted frame surfaces.
    #[must_use]
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    /// Set the encoded format of extracted frames.
    #[must_use]
    pub fn with_encoding(mut self, encoding: FrameEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The configured pixel format.
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// The configured frame encoding.
    pub fn encoding(&self) -> FrameEncoding {
        self.encoding
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
