//! Blocking periodic-timer host for playback.
//!
//! Where there is no display loop to piggyback on, [`Ticker`] supplies the
//! scheduling opportunities itself: it ticks the animator once per period on
//! the calling thread until playback stops, a limit elapses, or its
//! cancellation token fires.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use spritemover::{SourceImage, SpriteAnimator, Ticker};
//!
//! let mut animator = SpriteAnimator::new();
//! animator.load(&SourceImage::open("walk.png")?)?;
//!
//! let stats = Ticker::new(Duration::from_millis(16))
//!     .with_limit(Duration::from_secs(3))
//!     .run(&mut animator, |animator, advanced| {
//!         if advanced {
//!             println!("frame {}", animator.current_index());
//!         }
//!     });
//! println!("{} ticks, {} advances", stats.ticks, stats.advances);
//! # Ok::<(), spritemover::SpriteError>(())
//! ```

use std::thread;
use std::time::{Duration, Instant};

use crate::animator::SpriteAnimator;
use crate::clock::Clock;
use crate::progress::CancellationToken;

/// Default tick period, roughly one 60 Hz display refresh.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(16);

/// Why a [`Ticker`] run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The animator stopped wanting ticks (paused, reset, or empty).
    PlaybackStopped,
    /// The configured run limit elapsed.
    LimitReached,
    /// The cancellation token fired.
    Cancelled,
}

/// Summary of one [`Ticker::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerStats {
    /// Scheduling opportunities delivered.
    pub ticks: u64,
    /// Ticks on which the frame changed.
    pub advances: u64,
    /// Why the run ended.
    pub reason: StopReason,
}

/// Drives a [`SpriteAnimator`] from a fixed-period timer.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    limit: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl Ticker {
    /// Create a ticker firing every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            limit: None,
            cancellation: None,
        }
    }

    /// Stop after `limit` of wall-clock time.
    #[must_use]
    pub fn with_limit(mut self, limit: Duration) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Stop when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Tick `animator` until playback stops, the limit elapses, or the
    /// token is cancelled.
    ///
    /// `on_tick` runs after every tick with the animator and whether the
    /// frame changed. It may pause or reset the animator, which ends the
    /// run before the next tick is scheduled.
    pub fn run<C, F>(&self, animator: &mut SpriteAnimator<C>, mut on_tick: F) -> TickerStats
    where
        C: Clock,
        F: FnMut(&mut SpriteAnimator<C>, bool),
    {
        let started = Instant::now();
        let mut ticks = 0;
        let mut advances = 0;

        log::debug!(
            "Ticker running (period={:?}, limit={:?})",
            self.period,
            self.limit
        );

        let reason = loop {
            if !animator.wants_tick() {
                break StopReason::PlaybackStopped;
            }
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                break StopReason::Cancelled;
            }
            if self.limit.is_some_and(|limit| started.elapsed() >= limit) {
                break StopReason::LimitReached;
            }

            let advanced = animator.tick();
            ticks += 1;
            if advanced {
                advances += 1;
            }
            on_tick(animator, advanced);
            if !animator.wants_tick() {
                break StopReason::PlaybackStopped;
            }

            thread::sleep(self.period);
        };

        log::debug!("Ticker stopped after {ticks} ticks ({reason:?})");
        TickerStats {
            ticks,
            advances,
            reason,
        }
    }
}
