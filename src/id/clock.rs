// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Millisecond time sources for the ID allocator.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use std::time::Instant;

use chrono::Utc;

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// The allocator only needs "now"; it measures against its own configured
/// epoch. Implementations must be cheap, as the clock is read once per
/// generated ID.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since 1970-01-01T00:00:00Z.
    fn current_millis(&self) -> i64;
}

/// Monotonic process clock aligned to the wall clock once, at construction.
///
/// Readings are the wall-clock time captured at startup plus the `Instant`
/// elapsed since. Later adjustments to the system clock (NTP steps, manual
/// changes) are not observed, so readings never go backward.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    anchor_ms: i64,
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            anchor_ms: Utc::now().timestamp_millis(),
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.start.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.anchor_ms.saturating_add(elapsed)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and hand another to an allocator.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by_ms: i64) {
        self.now.fetch_add(by_ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn current_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Type-erased clock, so one allocator type serves both the system clock and
/// test clocks.
pub type SharedClock = Arc<dyn TimeSource>;

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();

        handle.advance(5);
        assert_eq!(clock.current_millis(), 1_005);

        handle.set(10);
        assert_eq!(clock.current_millis(), 10);
    }

    #[test]
    fn system_clock_is_after_2024() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock::new().current_millis() > 1_704_067_200_000);
    }

    #[test]
    fn system_clock_never_goes_backward() {
        let clock = SystemClock::new();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.current_millis() >= last + 5);
    }
}
