// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ID allocator errors.

use super::snowflake::MAX_NODE_ID;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocatorError {
    /// The epoch date could not be parsed, is not in the past, or is too old
    /// for the timestamp field.
    #[error("invalid epoch '{date}': {reason}")]
    InvalidEpoch { date: String, reason: String },

    /// Node id does not fit in the node field.
    #[error("node id {0} out of range (expected 0..={max})", max = MAX_NODE_ID)]
    InvalidNodeId(i64),

    /// The clock stayed behind the last issued tick for longer than the
    /// caller was willing to wait.
    #[error("clock moved backward by {behind_ms}ms")]
    ClockMovedBackward { behind_ms: i64 },

    /// All sequence numbers of the current millisecond were used and the
    /// clock did not advance in time.
    #[error("sequence exhausted for the current millisecond")]
    SequenceExhausted,
}
