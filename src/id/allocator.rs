// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Lock-based snowflake allocator.
//!
//! One allocator is shared by every request task. The `(last_tick, sequence)`
//! pair lives behind a mutex; the clock is read inside the critical section so
//! two racing callers can never observe ticks out of order.
//!
//! ## Waiting
//!
//! The critical section never sleeps. When it cannot hand out an ID it reports
//! how long the caller should wait, the lock is released, and the caller backs
//! off and retries:
//!
//! - sequence exhausted (4096 IDs in one millisecond): yield until the next tick
//! - clock behind the last issued tick: sleep until it catches up
//!
//! [`IdAllocator::generate`] always stalls through a clock regression rather
//! than emitting a duplicate or out-of-order ID. [`IdAllocator::generate_within`]
//! gives up after a caller-supplied budget instead.

use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use super::clock::{SystemClock, TimeSource};
use super::error::AllocatorError;
use super::snowflake::{SnowflakeId, MAX_NODE_ID, MAX_SEQUENCE, MAX_TIMESTAMP};

/// Calendar format of the configured epoch.
pub const EPOCH_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
struct TickState {
    /// Milliseconds since epoch of the last issued ID, -1 before the first.
    last_tick: i64,
    sequence: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextId {
    Ready(SnowflakeId),
    Exhausted,
    Behind { behind_ms: i64 },
}

/// Snowflake ID allocator for a single node.
pub struct IdAllocator<C: TimeSource = SystemClock> {
    epoch_ms: i64,
    node_id: i64,
    state: Mutex<TickState>,
    clock: C,
}

impl IdAllocator<SystemClock> {
    /// Create an allocator on the system clock.
    ///
    /// # Errors
    /// - [`AllocatorError::InvalidNodeId`] if `node_id` is outside `0..=1023`
    /// - [`AllocatorError::InvalidEpoch`] if `epoch_date` is not `YYYY-MM-DD`,
    ///   is not in the past, or lies further back than the 41-bit timestamp
    ///   can represent
    pub fn new(epoch_date: &str, node_id: i64) -> Result<Self, AllocatorError> {
        Self::with_clock(epoch_date, node_id, SystemClock::new())
    }
}

impl<C: TimeSource> IdAllocator<C> {
    /// Create an allocator reading time from `clock`.
    pub fn with_clock(epoch_date: &str, node_id: i64, clock: C) -> Result<Self, AllocatorError> {
        if !(0..=MAX_NODE_ID).contains(&node_id) {
            return Err(AllocatorError::InvalidNodeId(node_id));
        }

        let epoch_ms = parse_epoch(epoch_date)?;
        let now = clock.current_millis();
        if epoch_ms >= now {
            return Err(invalid_epoch(epoch_date, "epoch is not in the past"));
        }
        if now - epoch_ms > MAX_TIMESTAMP {
            return Err(invalid_epoch(
                epoch_date,
                "epoch is too far in the past for a 41-bit timestamp",
            ));
        }

        Ok(Self {
            epoch_ms,
            node_id,
            state: Mutex::new(TickState {
                last_tick: -1,
                sequence: 0,
            }),
            clock,
        })
    }

    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    /// Epoch as Unix milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.epoch_ms
    }

    /// Generate the next ID, waiting out sequence exhaustion and clock
    /// regressions.
    pub fn generate(&self) -> SnowflakeId {
        loop {
            match self.try_next() {
                NextId::Ready(id) => return id,
                NextId::Exhausted => thread::yield_now(),
                NextId::Behind { behind_ms } => self.stall(behind_ms),
            }
        }
    }

    /// Generate the next ID, giving up once `timeout` has elapsed.
    ///
    /// # Errors
    /// - [`AllocatorError::ClockMovedBackward`] if the clock is further behind
    ///   the last issued tick than the remaining budget
    /// - [`AllocatorError::SequenceExhausted`] if the clock did not advance to
    ///   a fresh millisecond within the budget
    pub fn generate_within(&self, timeout: Duration) -> Result<SnowflakeId, AllocatorError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.try_next() {
                NextId::Ready(id) => return Ok(id),
                NextId::Exhausted => {
                    if remaining.is_zero() {
                        return Err(AllocatorError::SequenceExhausted);
                    }
                    thread::yield_now();
                }
                NextId::Behind { behind_ms } => {
                    if millis(behind_ms) > remaining {
                        return Err(AllocatorError::ClockMovedBackward { behind_ms });
                    }
                    self.stall(behind_ms);
                }
            }
        }
    }

    fn try_next(&self) -> NextId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let tick = self.clock.current_millis() - self.epoch_ms;

        match tick.cmp(&state.last_tick) {
            Ordering::Greater => {
                state.last_tick = tick;
                state.sequence = 0;
                NextId::Ready(SnowflakeId::from_parts(tick, self.node_id, 0))
            }
            Ordering::Equal if state.sequence < MAX_SEQUENCE => {
                state.sequence += 1;
                NextId::Ready(SnowflakeId::from_parts(tick, self.node_id, state.sequence))
            }
            Ordering::Equal => NextId::Exhausted,
            Ordering::Less => NextId::Behind {
                behind_ms: state.last_tick - tick,
            },
        }
    }

    fn stall(&self, behind_ms: i64) {
        tracing::warn!(
            node_id = self.node_id,
            behind_ms,
            "Clock moved backward, stalling ID generation"
        );
        thread::sleep(millis(behind_ms));
    }
}

fn millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

fn parse_epoch(date: &str) -> Result<i64, AllocatorError> {
    let day = NaiveDate::parse_from_str(date, EPOCH_FORMAT)
        .map_err(|e| invalid_epoch(date, &e.to_string()))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| invalid_epoch(date, "no midnight on this date"))?;
    Ok(midnight.and_utc().timestamp_millis())
}

fn invalid_epoch(date: &str, reason: &str) -> AllocatorError {
    AllocatorError::InvalidEpoch {
        date: date.to_string(),
        reason: reason.to_string(),
    }
}
