//! Decoded sprite sheet sources.
//!
//! The extractor only ever sees decoded pixels. [`SourceImage`] is the thin
//! layer that turns a file or an in-memory upload into a
//! [`DynamicImage`] and remembers the name it came from.

use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::SpriteError;

/// A decoded sprite sheet plus the file name it was loaded from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    file_name: Option<String>,
}

impl SourceImage {
    /// Open and decode an image file.
    ///
    /// Only extensions the `image` crate recognises as raster formats are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::UnsupportedFormat`] for unknown extensions and
    /// [`SpriteError::FileOpen`] if the file cannot be read or decoded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spritemover::SourceImage;
    ///
    /// let source = SourceImage::open("walk_cycle.png")?;
    /// println!("{} is {:?}", source.file_name().unwrap_or("?"), source.dimensions());
    /// # Ok::<(), spritemover::SpriteError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SpriteError> {
        let path = path.as_ref();
        if ImageFormat::from_path(path).is_err() {
            return Err(SpriteError::UnsupportedFormat(path.to_path_buf()));
        }

        log::debug!("Opening sprite sheet: {}", path.display());
        let file_open_error = |reason: String| SpriteError::FileOpen {
            path: path.to_path_buf(),
            reason,
        };
        let image = ImageReader::open(path)
            .map_err(|e| file_open_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| file_open_error(e.to_string()))?
            .decode()
            .map_err(|e| file_open_error(e.to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self { image, file_name })
    }

    /// Decode an image held in memory, such as an upload.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::ImageError`] if the bytes are not a decodable
    /// image.
    pub fn from_bytes(bytes: &[u8], file_name: Option<String>) -> Result<Self, SpriteError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self { image, file_name })
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage, file_name: Option<String>) -> Self {
        Self { image, file_name }
    }

    /// The decoded pixels.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Name of the file this image came from, if known.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Image size as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Consume and return the decoded pixels.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}
