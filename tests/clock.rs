//! Clock implementation tests.

use std::time::Duration;

use spritemover::{Clock, ManualClock, MonotonicClock};

#[test]
fn manual_clock_shares_time_between_clones() {
    let clock = ManualClock::new();
    let handle = clock.clone();
    assert_eq!(clock.now(), Duration::ZERO);

    handle.advance(Duration::from_millis(40));
    handle.advance(Duration::from_millis(60));
    assert_eq!(clock.now(), Duration::from_millis(100));
}

#[test]
fn manual_clock_never_runs_backwards() {
    let clock = ManualClock::new();
    clock.set(Duration::from_secs(2));
    clock.set(Duration::from_secs(1));
    assert_eq!(clock.now(), Duration::from_secs(2));
}

#[test]
fn manual_clock_saturates_instead_of_wrapping() {
    let clock = ManualClock::new();
    clock.advance(Duration::from_secs(10));
    clock.advance(Duration::from_nanos(u64::MAX));
    assert_eq!(clock.now(), Duration::from_nanos(u64::MAX));

    clock.advance(Duration::MAX);
    assert_eq!(clock.now(), Duration::from_nanos(u64::MAX));

    clock.set(Duration::MAX);
    assert_eq!(clock.now(), Duration::from_nanos(u64::MAX));
}

#[test]
fn monotonic_clock_moves_forward() {
    let clock = MonotonicClock::new();
    let first = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    assert!(clock.now() > first);
}
