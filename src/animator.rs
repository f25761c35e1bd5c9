//! The sprite preview state machine.
//!
//! [`SpriteAnimator`] ties extraction and playback together:
//!
//! ```text
//!            load ok                 toggle
//!   Empty ───────────▶ Playing ◀──────────────▶ Paused
//!     ▲                   │                        │
//!     └──────── reset ────┴──────── reset ─────────┘
//! ```
//!
//! A load that fails geometry validation changes nothing, whichever state
//! the animator is in.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use image::{DynamicImage, RgbaImage};
//! use spritemover::{AnimatorState, GridGeometry, ManualClock, SourceImage, SpriteAnimator};
//!
//! let clock = ManualClock::new();
//! let mut animator = SpriteAnimator::with_clock(clock.clone())
//!     .with_geometry(GridGeometry::new(4, 100, 50)?);
//!
//! let sheet = SourceImage::from_image(DynamicImage::ImageRgba8(RgbaImage::new(400, 50)), None);
//! animator.load(&sheet)?;
//! assert_eq!(animator.state(), AnimatorState::Playing);
//!
//! clock.advance(Duration::from_millis(100));
//! animator.tick();
//! assert_eq!(animator.current_index(), 1);
//! # Ok::<(), spritemover::SpriteError>(())
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::configuration::ExtractOptions;
use crate::error::SpriteError;
use crate::extractor::FrameExtractor;
use crate::frame::{Frame, FrameSequence};
use crate::geometry::GridGeometry;
use crate::scheduler::{DEFAULT_FPS, PlaybackScheduler};
use crate::source::SourceImage;

/// Coarse state of a [`SpriteAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No frames loaded.
    Empty,
    /// Frames loaded and advancing.
    Playing,
    /// Frames loaded, index frozen.
    Paused,
}

/// Everything a presentation layer needs to draw the preview controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// Current coarse state.
    pub state: AnimatorState,
    /// Index of the frame on screen.
    pub current_index: usize,
    /// Number of frames loaded.
    pub frame_count: usize,
    /// Whether playback is running.
    pub is_playing: bool,
    /// Playback rate.
    pub fps: u32,
    /// `1000 / fps`, rounded to whole milliseconds.
    pub frame_interval_ms: u32,
    /// Name of the loaded sheet, if any.
    pub file_name: Option<String>,
}

/// Loads sprite sheets and plays their frames back in a loop.
///
/// The animator is single-threaded: the host calls [`tick`](SpriteAnimator::tick)
/// from its redraw callback or timer, and stops doing so as soon as
/// [`wants_tick`](SpriteAnimator::wants_tick) returns `false`.
#[derive(Debug)]
pub struct SpriteAnimator<C: Clock = MonotonicClock> {
    geometry: GridGeometry,
    options: ExtractOptions,
    frames: Option<FrameSequence>,
    scheduler: PlaybackScheduler,
    playing: bool,
    file_name: Option<String>,
    clock: C,
}

impl SpriteAnimator<MonotonicClock> {
    /// Create an empty animator driven by wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for SpriteAnimator<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SpriteAnimator<C> {
    /// Create an empty animator reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            geometry: GridGeometry::default(),
            options: ExtractOptions::default(),
            frames: None,
            scheduler: PlaybackScheduler::new(DEFAULT_FPS),
            playing: false,
            file_name: None,
            clock,
        }
    }

    /// Set the geometry used by subsequent loads.
    #[must_use]
    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the extraction options used by subsequent loads.
    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the initial playback rate (clamped).
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.scheduler.set_fps(fps);
        self
    }

    /// Geometry the next load will be validated against.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Change the geometry for subsequent loads. Loaded frames are kept.
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        self.geometry = geometry;
    }

    /// Extract `source` and, on success, install the frames and start
    /// playing from frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::GeometryMismatch`] (or an extraction error)
    /// without modifying any existing state.
    pub fn load(&mut self, source: &SourceImage) -> Result<&FrameSequence, SpriteError> {
        let sequence = FrameExtractor::new(self.geometry)
            .extract_with_options(source.image(), &self.options)?;

        log::info!(
            "Loaded {} frames from {}",
            sequence.len(),
            source.file_name().unwrap_or("<memory>"),
        );
        self.file_name = source.file_name().map(str::to_owned);
        self.scheduler.install(sequence.len());
        let sequence = self.frames.insert(sequence);

        self.playing = true;
        self.scheduler.start(self.clock.now());
        Ok(sequence)
    }

    /// Flip between playing and paused. No-op when empty.
    ///
    /// Returns whether the animator is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    /// Resume playback from the current frame. No-op when empty.
    pub fn play(&mut self) {
        if self.playing || self.frame_count() == 0 {
            return;
        }
        self.playing = true;
        self.scheduler.start(self.clock.now());
    }

    /// Freeze playback on the current frame.
    pub fn pause(&mut self) {
        self.playing = false;
        self.scheduler.stop();
    }

    /// Stop playback, drop the frames, rewind to 0, and forget the file name.
    pub fn reset(&mut self) {
        log::debug!("Resetting animator");
        self.playing = false;
        self.frames = None;
        self.scheduler.clear();
        self.file_name = None;
    }

    /// Handle one scheduling opportunity.
    ///
    /// Returns `true` if the current frame changed.
    pub fn tick(&mut self) -> bool {
        if !self.wants_tick() {
            return false;
        }
        self.scheduler.tick(self.clock.now())
    }

    /// Whether the host should keep scheduling ticks.
    pub fn wants_tick(&self) -> bool {
        self.playing && self.frame_count() > 0
    }

    /// Change the playback rate (clamped). Applies from the next tick.
    pub fn set_fps(&mut self, fps: u32) {
        self.scheduler.set_fps(fps);
    }

    /// Current playback rate.
    pub fn fps(&self) -> u32 {
        self.scheduler.fps()
    }

    /// The frame to display, if any are loaded.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames
            .as_ref()
            .and_then(|frames| frames.get(self.scheduler.current_index()))
    }

    /// Index of the frame to display.
    pub fn current_index(&self) -> usize {
        self.scheduler.current_index()
    }

    /// Number of frames loaded.
    pub fn frame_count(&self) -> usize {
        self.frames.as_ref().map_or(0, FrameSequence::len)
    }

    /// The loaded frames, if any.
    pub fn frames(&self) -> Option<&FrameSequence> {
        self.frames.as_ref()
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Name of the loaded sheet, if known.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Coarse state.
    pub fn state(&self) -> AnimatorState {
        match (self.frame_count(), self.playing) {
            (0, _) => AnimatorState::Empty,
            (_, true) => AnimatorState::Playing,
            (_, false) => AnimatorState::Paused,
        }
    }

    /// Capture the values a UI displays.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let fps = self.fps();
        PlaybackSnapshot {
            state: self.state(),
            current_index: self.current_index(),
            frame_count: self.frame_count(),
            is_playing: self.playing,
            fps,
            frame_interval_ms: (1000.0 / fps as f64).round() as u32,
            file_name: self.file_name.clone(),
        }
    }

    /// The clock this animator reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
