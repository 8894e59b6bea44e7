// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User ID Allocation
//!
//! Snowflake-style identifiers minted without a central sequence. Each running
//! instance is configured with a distinct node id; IDs are unique across nodes
//! and strictly increasing per node.

pub mod allocator;
pub mod clock;
pub mod error;
pub mod snowflake;

pub use allocator::IdAllocator;
pub use clock::{ManualClock, SharedClock, SystemClock, TimeSource};
pub use error::AllocatorError;
pub use snowflake::SnowflakeId;
