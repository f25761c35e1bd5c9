//! # spritemover
//!
//! Slice horizontally-tiled sprite sheets into frames and preview them as a
//! looping animation.
//!
//! `spritemover` checks that a sheet is exactly `frame_width * frame_count`
//! by `frame_height` pixels, cuts it into one [`image::DynamicImage`] per
//! column (each also encoded as a still image), and plays the frames back at
//! a configurable rate.
//!
//! ## Quick Start
//!
//! ### Extract Frames
//!
//! ```no_run
//! use spritemover::{FrameExtractor, GridGeometry, SourceImage};
//!
//! let source = SourceImage::open("walk_cycle.png")?;
//! let geometry = GridGeometry::new(8, 64, 64)?;
//! let frames = FrameExtractor::new(geometry).extract(source.image())?;
//! for frame in &frames {
//!     println!("frame {}: {} PNG bytes", frame.index(), frame.encoded().len());
//! }
//! # Ok::<(), spritemover::SpriteError>(())
//! ```
//!
//! ### Preview an Animation
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use spritemover::{GridGeometry, SourceImage, SpriteAnimator, Ticker};
//!
//! let mut animator = SpriteAnimator::new()
//!     .with_geometry(GridGeometry::new(8, 64, 64)?)
//!     .with_fps(12);
//! animator.load(&SourceImage::open("walk_cycle.png")?)?;
//!
//! Ticker::new(Duration::from_millis(16))
//!     .with_limit(Duration::from_secs(2))
//!     .run(&mut animator, |animator, advanced| {
//!         if advanced {
//!             println!("frame {}/{}", animator.current_index() + 1, animator.frame_count());
//!         }
//!     });
//! # Ok::<(), spritemover::SpriteError>(())
//! ```
//!
//! ## Features
//!
//! - **Geometry validation**: sheets that do not match the declared grid
//!   are rejected with the expected and actual sizes
//! - **Frame extraction**: left-to-right column slicing into RGBA8, RGB8,
//!   or Gray8 surfaces, each encoded as PNG, BMP, or TIFF
//! - **Playback scheduling**: minimum-interval gate at 1–30 fps, looping,
//!   with no catch-up bursts after stalls
//! - **Preview state machine**: load, play, pause, toggle, reset
//! - **Progress & cancellation**: cooperative callbacks and
//!   `CancellationToken` during extraction
//! - **Hosts**: blocking `Ticker`, or bring your own redraw loop
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | `PlaybackStream` driven by a Tokio interval |
//! | `rayon` | `extract_parallel()` copies columns on rayon threads |
//! | `full` | Enables all of the above |

pub mod animator;
pub mod clock;
pub mod configuration;
pub mod error;
pub mod extractor;
pub mod frame;
pub mod geometry;
pub mod progress;
#[cfg(feature = "rayon")]
mod rayon;
pub mod scheduler;
pub mod source;
#[cfg(feature = "async")]
pub mod stream;
pub mod ticker;

pub use animator::{AnimatorState, PlaybackSnapshot, SpriteAnimator};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use configuration::{ExtractOptions, FrameEncoding, PixelFormat};
pub use error::SpriteError;
pub use extractor::FrameExtractor;
pub use frame::{Frame, FrameSequence};
pub use geometry::GridGeometry;
pub use progress::{CancellationToken, OperationType, ProgressCallback, ProgressInfo};
pub use scheduler::PlaybackScheduler;
pub use source::SourceImage;
#[cfg(feature = "async")]
pub use stream::PlaybackStream;
pub use ticker::{StopReason, Ticker, TickerStats};
