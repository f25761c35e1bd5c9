//! Async playback driven by a Tokio interval.
//!
//! [`PlaybackStream`] owns a [`SpriteAnimator`] and ticks it from a
//! [`tokio::time::Interval`], yielding the new frame index every time the
//! frame changes. The stream ends as soon as the animator stops wanting
//! ticks, so pausing or resetting through
//! [`animator_mut`](PlaybackStream::animator_mut) leaves no timer behind.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use tokio_stream::StreamExt;
//!
//! use spritemover::{PlaybackStream, SourceImage, SpriteAnimator, SpriteError};
//!
//! # async fn example() -> Result<(), SpriteError> {
//! let mut animator = SpriteAnimator::new();
//! animator.load(&SourceImage::open("walk.png")?)?;
//!
//! let mut stream = PlaybackStream::new(animator, Duration::from_millis(16));
//! while let Some(index) = stream.next().await {
//!     println!("showing frame {index}");
//!     if index == 0 {
//!         stream.animator_mut().pause();
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use futures_core::Stream;
use tokio::time::{Interval, MissedTickBehavior};

use crate::animator::SpriteAnimator;
use crate::clock::{Clock, MonotonicClock};

/// A stream of frame indices produced by interval-driven playback.
///
/// Must be created and polled inside a Tokio runtime with the time driver
/// enabled.
pub struct PlaybackStream<C: Clock = MonotonicClock> {
    animator: SpriteAnimator<C>,
    interval: Interval,
}

impl<C: Clock> PlaybackStream<C> {
    /// Wrap `animator`, offering it a tick every `period`.
    ///
    /// Missed ticks are delayed rather than burst, so a stalled runtime
    /// still advances at most one frame per tick.
    pub fn new(animator: SpriteAnimator<C>, period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { animator, interval }
    }

    /// The animator being driven.
    pub fn animator(&self) -> &SpriteAnimator<C> {
        &self.animator
    }

    /// Mutable access to the animator, e.g. to pause or change fps.
    pub fn animator_mut(&mut self) -> &mut SpriteAnimator<C> {
        &mut self.animator
    }

    /// Stop streaming and hand the animator back.
    pub fn into_inner(self) -> SpriteAnimator<C> {
        self.animator
    }
}

impl<C: Clock + Unpin> Stream for PlaybackStream<C> {
    type Item = usize;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if !this.animator.wants_tick() {
                return Poll::Ready(None);
            }
            ready!(this.interval.poll_tick(cx));
            if this.animator.tick() {
                return Poll::Ready(Some(this.animator.current_index()));
            }
        }
    }
}
