//! Sprite sheet grid geometry.
//!
//! A [`GridGeometry`] declares how many frames a sheet holds and how large
//! each frame is. Sheets are always a single horizontal strip, so the
//! expected source size is `frame_width * frame_count` by `frame_height`.
//!
//! # Example
//!
//! ```
//! use spritemover::GridGeometry;
//!
//! let geometry = GridGeometry::new(4, 100, 50)?;
//! assert_eq!(geometry.expected_dimensions(), (400, 50));
//! assert_eq!(geometry.column_origin(3), (300, 0));
//! # Ok::<(), spritemover::SpriteError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;

use crate::error::SpriteError;

/// Permitted number of frames in a sheet.
pub const FRAME_COUNT_RANGE: RangeInclusive<u32> = 1..=30;

/// Permitted width and height of a single frame, in pixels.
pub const FRAME_SIZE_RANGE: RangeInclusive<u32> = 16..=2048;

/// Default number of frames.
pub const DEFAULT_FRAME_COUNT: u32 = 10;

/// Default frame width in pixels.
pub const DEFAULT_FRAME_WIDTH: u32 = 567;

/// Default frame height in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 567;

/// Declared layout of a single-row sprite sheet.
///
/// All three fields are guaranteed to lie within [`FRAME_COUNT_RANGE`] and
/// [`FRAME_SIZE_RANGE`]; construct with [`new`](GridGeometry::new) to reject
/// out-of-range values or [`clamped`](GridGeometry::clamped) to pull them
/// into range the way a form input would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridGeometry {
    frame_count: u32,
    frame_width: u32,
    frame_height: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl GridGeometry {
    /// Create a geometry, rejecting any field outside its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::InvalidGeometry`] naming the first offending
    /// field.
    pub fn new(frame_count: u32, frame_width: u32, frame_height: u32) -> Result<Self, SpriteError> {
        check_bounds("frame count", frame_count, &FRAME_COUNT_RANGE)?;
        check_bounds("frame width", frame_width, &FRAME_SIZE_RANGE)?;
        check_bounds("frame height", frame_height, &FRAME_SIZE_RANGE)?;
        Ok(Self {
            frame_count,
            frame_width,
            frame_height,
        })
    }

    /// Create a geometry, clamping every field into its bounds.
    ///
    /// Zero falls back to the lower bound, so a blank or unparsable input
    /// that a caller maps to `0` still yields a usable geometry.
    pub fn clamped(frame_count: u32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_count: clamp_to(frame_count, &FRAME_COUNT_RANGE),
            frame_width: clamp_to(frame_width, &FRAME_SIZE_RANGE),
            frame_height: clamp_to(frame_height, &FRAME_SIZE_RANGE),
        }
    }

    /// Number of frames in the sheet.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Width of one frame in pixels.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of one frame in pixels.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Size of one frame as `(width, height)`.
    pub fn frame_dimensions(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    /// Size the source sheet must have, as `(width, height)`.
    pub fn expected_dimensions(&self) -> (u32, u32) {
        (self.frame_width * self.frame_count, self.frame_height)
    }

    /// Whether an image of `(width, height)` matches this geometry exactly.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.expected_dimensions() == (width, height)
    }

    /// Top-left corner of column `index` within the source sheet.
    pub fn column_origin(&self, index: u32) -> (u32, u32) {
        (index * self.frame_width, 0)
    }

    /// Return a copy with a different frame count (clamped).
    #[must_use]
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = clamp_to(frame_count, &FRAME_COUNT_RANGE);
        self
    }

    /// Return a copy with a different frame width (clamped).
    #[must_use]
    pub fn with_frame_width(mut self, frame_width: u32) -> Self {
        self.frame_width = clamp_to(frame_width, &FRAME_SIZE_RANGE);
        self
    }

    /// Return a copy with a different frame height (clamped).
    #[must_use]
    pub fn with_frame_height(mut self, frame_height: u32) -> Self {
        self.frame_height = clamp_to(frame_height, &FRAME_SIZE_RANGE);
        self
    }
}

impl Display for GridGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (sheet_width, sheet_height) = self.expected_dimensions();
        write!(
            f,
            "{sheet_width}x{sheet_height}px image with {} frames ({}x{}px each)",
            self.frame_count, self.frame_width, self.frame_height,
        )
    }
}

fn check_bounds(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), SpriteError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SpriteError::InvalidGeometry {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}
