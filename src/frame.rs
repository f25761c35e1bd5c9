//! Extracted frames.
//!
//! A [`Frame`] is one column of a sprite sheet: its decoded surface plus the
//! encoded still image a presentation layer displays. A [`FrameSequence`] is
//! the ordered, immutable result of one successful extraction.

use std::io::Cursor;
use std::ops::Index;
use std::slice::Iter;

use image::DynamicImage;

use crate::configuration::FrameEncoding;
use crate::error::SpriteError;
use crate::geometry::GridGeometry;

/// A single frame cut from a sprite sheet column.
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    image: DynamicImage,
    encoded: Vec<u8>,
    encoding: FrameEncoding,
}

impl Frame {
    /// Encode `image` and wrap it as the frame for column `index`.
    pub(crate) fn encode(
        index: usize,
        image: DynamicImage,
        encoding: FrameEncoding,
    ) -> Result<Self, SpriteError> {
        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), encoding.image_format())
            .map_err(|e| SpriteError::EncodeError {
                index,
                reason: e.to_string(),
            })?;

        Ok(Self {
            index,
            image,
            encoded,
            encoding,
        })
    }

    /// Column index within the source sheet (0 is leftmost).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The decoded frame surface.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The encoded still image bytes.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Format of [`encoded`](Frame::encoded).
    pub fn encoding(&self) -> FrameEncoding {
        self.encoding
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Ordered frames produced by one extraction, leftmost column first.
///
/// Immutable once built. An animator replaces its sequence wholesale on
/// each successful load and drops it on reset.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    geometry: GridGeometry,
}

impl FrameSequence {
    pub(crate) fn new(frames: Vec<Frame>, geometry: GridGeometry) -> Self {
        Self { frames, geometry }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames as a slice.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate over the frames in column order.
    pub fn iter(&self) -> Iter<'_, Frame> {
        self.frames.iter()
    }

    /// The geometry these frames were cut with.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Consume the sequence and return the frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl Index<usize> for FrameSequence {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
