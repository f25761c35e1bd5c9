//! Rayon-based parallel column extraction.
//!
//! Columns of a sheet are independent, so each one is copied and encoded on
//! its own rayon task. Results are sorted back into column order before
//! they are returned.

use ::rayon::iter::{IntoParallelIterator, ParallelIterator};
use image::DynamicImage;

use crate::configuration::ExtractOptions;
use crate::error::SpriteError;
use crate::extractor::extract_column;
use crate::frame::Frame;
use crate::geometry::GridGeometry;
use crate::progress::{OperationType, ProgressTracker};

/// Extract every column of `source` in parallel.
///
/// `source` must already have been validated against `geometry`. The
/// progress callback fires once, after all columns are done.
pub(crate) fn parallel_extract_columns(
    source: &DynamicImage,
    geometry: &GridGeometry,
    options: &ExtractOptions,
) -> Result<Vec<Frame>, SpriteError> {
    let frame_count = geometry.frame_count();
    log::debug!("Extracting {} columns on rayon threads", frame_count);

    let results: Result<Vec<Frame>, SpriteError> = (0..frame_count)
        .into_par_iter()
        .map(|index| {
            if options.is_cancelled() {
                return Err(SpriteError::Cancelled);
            }
            extract_column(source, geometry, index, options)
        })
        .collect();

    let mut frames = results?;
    frames.sort_by_key(Frame::index);

    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        OperationType::FrameExtraction,
        frame_count as u64,
        u64::MAX,
    );
    for frame in &frames {
        tracker.advance(frame.index() as u64);
    }
    tracker.finish();

    Ok(frames)
}
