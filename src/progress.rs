//! Progress reporting and cancellation support.
//!
//! This module provides [`ProgressCallback`] for monitoring extraction progress,
//! [`CancellationToken`] for cooperative cancellation, and [`ProgressInfo`] for
//! detailed progress snapshots.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use spritemover::{
//!     ExtractOptions, FrameExtractor, GridGeometry, ProgressCallback, ProgressInfo,
//!     SourceImage, SpriteError,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("[{:?}] {:.1}% complete", info.operation, info.percentage());
//!     }
//! }
//!
//! let source = SourceImage::open("walk.png")?;
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! let _frames = FrameExtractor::new(GridGeometry::default())
//!     .extract_with_options(source.image(), &options)?;
//! # Ok::<(), SpriteError>(())
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

/// The kind of operation currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Slicing and encoding sprite sheet columns.
    FrameExtraction,
}

/// How far an extraction has got.
///
/// Delivered to [`ProgressCallback::on_progress`] every
/// [`batch_size`](crate::ExtractOptions::with_batch_size) columns and once
/// more when the sheet is done.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// Columns finished so far.
    pub current: u64,
    /// Columns in the sheet.
    pub total: u64,
    /// Time since extraction began.
    pub elapsed: Duration,
    /// Column finished last, `None` on the final report.
    pub current_frame: Option<u64>,
}

impl ProgressInfo {
    /// Completion in percent.
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.current as f32 * 100.0 / self.total as f32
    }
}

/// Trait for receiving progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] because callbacks may be
/// invoked from rayon worker threads when the `rayon` feature is enabled.
///
/// Progress callbacks are **infallible**: they observe but cannot halt
/// the operation. Use [`CancellationToken`] for cooperative cancellation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during an extraction operation.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone this token and share it between threads; call [`cancel`](CancellationToken::cancel)
/// from any thread to request cancellation. Extraction checks the token
/// before each column and the [`Ticker`](crate::Ticker) checks it before
/// each tick.
///
/// # Example
///
/// ```
/// use spritemover::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    ///
    /// All clones of this token will observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts finished columns and reports every `batch_size` of them.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: u64,
    current: u64,
    batch_size: u64,
    started: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: u64,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            started: Instant::now(),
        }
    }

    pub(crate) fn advance(&mut self, frame_index: u64) {
        self.current += 1;
        if self.current % self.batch_size == 0 {
            self.report(Some(frame_index));
        }
    }

    pub(crate) fn finish(&self) {
        self.report(None);
    }

    fn report(&self, current_frame: Option<u64>) {
        self.callback.on_progress(&ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            elapsed: self.started.elapsed(),
            current_frame,
        });
    }
}
