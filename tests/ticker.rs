//! Blocking Ticker host tests.
//!
//! These run against the wall clock with short periods and limits.

use std::time::{Duration, Instant};

use image::{DynamicImage, RgbaImage};
use spritemover::{
    CancellationToken, GridGeometry, SourceImage, SpriteAnimator, StopReason, Ticker,
};

fn loaded_animator(fps: u32) -> SpriteAnimator {
    let mut animator = SpriteAnimator::new()
        .with_geometry(GridGeometry::new(4, 16, 16).expect("valid geometry"))
        .with_fps(fps);
    let sheet = SourceImage::from_image(DynamicImage::ImageRgba8(RgbaImage::new(64, 16)), None);
    animator.load(&sheet).expect("Failed to load");
    animator
}

#[test]
fn empty_animator_never_ticks() {
    let mut animator = SpriteAnimator::new();
    let stats = Ticker::new(Duration::from_millis(1)).run(&mut animator, |_, _| {
        panic!("callback must not run without frames");
    });
    assert_eq!(stats.ticks, 0);
    assert_eq!(stats.reason, StopReason::PlaybackStopped);
}

#[test]
fn stops_at_limit() {
    let mut animator = loaded_animator(30);
    let stats = Ticker::new(Duration::from_millis(2))
        .with_limit(Duration::from_millis(200))
        .run(&mut animator, |_, _| {});

    assert_eq!(stats.reason, StopReason::LimitReached);
    assert!(stats.ticks > 0);
    assert!(stats.advances > 0, "30 fps over 200 ms should advance");
    assert!(stats.advances <= stats.ticks);
    assert!(animator.is_playing());
}

#[test]
fn pausing_from_callback_ends_run() {
    let mut animator = loaded_animator(30);
    let stats = Ticker::new(Duration::from_millis(1))
        .with_limit(Duration::from_secs(10))
        .run(&mut animator, |animator, advanced| {
            if advanced {
                animator.pause();
            }
        });

    assert_eq!(stats.reason, StopReason::PlaybackStopped);
    assert_eq!(stats.advances, 1);
    assert_eq!(animator.current_index(), 1);
}

#[test]
fn pausing_from_callback_skips_final_sleep() {
    let mut animator = loaded_animator(10);
    let started = Instant::now();
    let stats = Ticker::new(Duration::from_secs(5))
        .with_limit(Duration::from_secs(10))
        .run(&mut animator, |animator, _| animator.pause());

    assert_eq!(stats.reason, StopReason::PlaybackStopped);
    assert_eq!(stats.ticks, 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn reset_from_callback_ends_run() {
    let mut animator = loaded_animator(10);
    let stats = Ticker::new(Duration::from_millis(1))
        .with_limit(Duration::from_secs(10))
        .run(&mut animator, |animator, _| animator.reset());

    assert_eq!(stats.reason, StopReason::PlaybackStopped);
    assert_eq!(stats.ticks, 1);
    assert_eq!(animator.frame_count(), 0);
}

#[test]
fn cancelled_token_ends_run() {
    let token = CancellationToken::new();
    token.cancel();
    let mut animator = loaded_animator(10);

    let stats = Ticker::default()
        .with_cancellation(token)
        .run(&mut animator, |_, _| {});

    assert_eq!(stats.reason, StopReason::Cancelled);
    assert_eq!(stats.ticks, 0);
}
