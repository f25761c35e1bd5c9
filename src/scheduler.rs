//! Playback timing.
//!
//! [`PlaybackScheduler`] owns the current frame index and decides, at each
//! scheduling opportunity, whether it is time to move to the next frame.
//!
//! The rule is a minimum-interval gate: the index moves forward by one when
//! at least `1000 / fps` milliseconds have passed since it last moved, and
//! the baseline then jumps to the current tick. A long stall therefore
//! costs time instead of skipping frames; each tick advances at most once.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use spritemover::PlaybackScheduler;
//!
//! let mut scheduler = PlaybackScheduler::new(10);
//! scheduler.install(4);
//! scheduler.start(Duration::ZERO);
//!
//! assert!(!scheduler.tick(Duration::from_millis(50)));
//! assert!(scheduler.tick(Duration::from_millis(100)));
//! assert_eq!(scheduler.current_index(), 1);
//! ```

use std::ops::RangeInclusive;
use std::time::Duration;

/// Permitted playback rates in frames per second.
pub const FPS_RANGE: RangeInclusive<u32> = 1..=30;

/// Default playback rate.
pub const DEFAULT_FPS: u32 = 10;

/// Clamp a requested rate into [`FPS_RANGE`].
pub fn clamp_fps(fps: u32) -> u32 {
    fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end())
}

/// Advances a looping frame index at a target rate.
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    fps: u32,
    frame_count: usize,
    current_index: usize,
    /// Time of the last advance. `None` while stopped.
    last_advance: Option<Duration>,
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl PlaybackScheduler {
    /// Create a stopped scheduler with no frames. `fps` is clamped.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: clamp_fps(fps),
            frame_count: 0,
            current_index: 0,
            last_advance: None,
        }
    }

    /// Replace the frame count with that of a freshly installed sequence.
    ///
    /// Stops the scheduler and rewinds to frame 0.
    pub fn install(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        self.current_index = 0;
        self.last_advance = None;
    }

    /// Begin running, with `now` as the baseline for the first interval.
    ///
    /// The current index is left where it is, so starting after a
    /// [`stop`](PlaybackScheduler::stop) resumes from the frozen frame.
    /// Does nothing when there are no frames.
    pub fn start(&mut self, now: Duration) {
        if self.frame_count == 0 {
            return;
        }
        self.last_advance = Some(now);
    }

    /// Stop running. The index stays frozen until the next start.
    pub fn stop(&mut self) {
        self.last_advance = None;
    }

    /// Stop and forget all frames.
    pub fn clear(&mut self) {
        self.install(0);
    }

    /// Whether the scheduler is accepting ticks.
    pub fn is_running(&self) -> bool {
        self.last_advance.is_some() && self.frame_count > 0
    }

    /// Handle one scheduling opportunity at time `now`.
    ///
    /// Returns `true` if the index advanced.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        let Some(last_advance) = self.last_advance else {
            return false;
        };

        if now.saturating_sub(last_advance) < self.interval() {
            return false;
        }

        self.current_index = (self.current_index + 1) % self.frame_count;
        self.last_advance = Some(now);
        true
    }

    /// Change the playback rate. Clamped into [`FPS_RANGE`].
    ///
    /// The baseline is kept, so the new interval applies from the next tick.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = clamp_fps(fps);
    }

    /// Current playback rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Minimum time each frame stays on screen.
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps as u64)
    }

    /// Index of the frame currently on screen.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of frames being cycled.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}
