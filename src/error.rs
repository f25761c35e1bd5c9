//! Error types for the `spritemover` crate.
//!
//! This module defines [`SpriteError`], the unified error type returned by all
//! fallible operations in the crate. The central variant is
//! [`SpriteError::GeometryMismatch`], raised when a sprite sheet does not match
//! the declared grid geometry.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `spritemover` operations.
///
/// Every public method that can fail returns `Result<T, SpriteError>`.
/// Variants carry enough context to report the problem to a user without
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpriteError {
    /// The source image dimensions do not equal
    /// `frame_width * frame_count` by `frame_height`.
    #[error(
        "Image must be {expected_width}x{expected_height}px (got {actual_width}x{actual_height}px)"
    )]
    GeometryMismatch {
        /// Width implied by the grid geometry.
        expected_width: u32,
        /// Height implied by the grid geometry.
        expected_height: u32,
        /// Width of the supplied image.
        actual_width: u32,
        /// Height of the supplied image.
        actual_height: u32,
    },

    /// A grid geometry field is outside its permitted bounds.
    #[error("Invalid {field}: {value} (must be between {min} and {max})")]
    InvalidGeometry {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// The source image could not be opened or decoded.
    #[error("Failed to open sprite sheet at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`SourceImage::open`](crate::SourceImage::open).
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file extension does not name a supported raster image format.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A frame could not be encoded into its output format.
    #[error("Failed to encode frame {index}: {reason}")]
    EncodeError {
        /// Column index of the frame being encoded.
        index: usize,
        /// Underlying encoder message.
        reason: String,
    },

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// An I/O error occurred while reading a source file.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while decoding a source image.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl SpriteError {
    /// Returns `true` if this is a [`GeometryMismatch`](SpriteError::GeometryMismatch).
    pub fn is_geometry_mismatch(&self) -> bool {
        matches!(self, SpriteError::GeometryMismatch { .. })
    }
}
