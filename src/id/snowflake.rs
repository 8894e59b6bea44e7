// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Snowflake identifier layout.
//!
//! ```text
//!  63  62                    22 21        12 11          0
//! +---+------------------------+------------+-------------+
//! | 0 | timestamp (41 bits)    | node (10)  | seq (12)    |
//! +---+------------------------+------------+-------------+
//! ```
//!
//! The timestamp is milliseconds since the allocator's configured epoch.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const TIMESTAMP_BITS: u32 = 41;
pub const NODE_BITS: u32 = 10;
pub const SEQUENCE_BITS: u32 = 12;

pub const NODE_SHIFT: u32 = SEQUENCE_BITS;
pub const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;

pub const MAX_TIMESTAMP: i64 = (1 << TIMESTAMP_BITS) - 1;
pub const MAX_NODE_ID: i64 = (1 << NODE_BITS) - 1;
pub const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

/// A 63-bit time-ordered identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(i64);

impl SnowflakeId {
    /// Packs the three fields. Callers guarantee each fits its width.
    pub(crate) fn from_parts(timestamp: i64, node_id: i64, sequence: i64) -> Self {
        debug_assert!((0..=MAX_TIMESTAMP).contains(&timestamp));
        debug_assert!((0..=MAX_NODE_ID).contains(&node_id));
        debug_assert!((0..=MAX_SEQUENCE).contains(&sequence));
        Self((timestamp << TIMESTAMP_SHIFT) | (node_id << NODE_SHIFT) | sequence)
    }

    pub const fn from_i64(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Milliseconds since the allocator epoch.
    pub const fn timestamp(self) -> i64 {
        self.0 >> TIMESTAMP_SHIFT
    }

    pub const fn node_id(self) -> i64 {
        (self.0 >> NODE_SHIFT) & MAX_NODE_ID
    }

    pub const fn sequence(self) -> i64 {
        self.0 & MAX_SEQUENCE
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as a decimal string: the values exceed 2^53 and JSON clients
// that parse numbers as doubles would silently round them.
impl Serialize for SnowflakeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<i64>()
            .map(SnowflakeId)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_round_trip_through_accessors() {
        let id = SnowflakeId::from_parts(123_456, 1023, 4095);
        assert_eq!(id.timestamp(), 123_456);
        assert_eq!(id.node_id(), 1023);
        assert_eq!(id.sequence(), 4095);
    }

    #[test]
    fn max_timestamp_keeps_sign_bit_clear() {
        let id = SnowflakeId::from_parts(MAX_TIMESTAMP, MAX_NODE_ID, MAX_SEQUENCE);
        assert!(id.as_i64() > 0);
        assert_eq!(id.as_i64(), i64::MAX);
    }

    #[test]
    fn later_timestamp_orders_after_any_sequence() {
        let early = SnowflakeId::from_parts(10, 5, MAX_SEQUENCE);
        let late = SnowflakeId::from_parts(11, 0, 0);
        assert!(late > early);
    }

    #[test]
    fn serializes_as_decimal_string() {
        let id = SnowflakeId::from_i64(1_234_567_890_123_456_789);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""1234567890123456789""#);

        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
