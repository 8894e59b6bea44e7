// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Forum Server - identity and session backend
//!
//! Accounts, stateless bearer sessions, and time-ordered user IDs for the
//! forum API.
//!
//! ## Modules
//!
//! - `id` - Snowflake ID allocation
//! - `auth` - Token issuance, verification, and the request gate
//! - `api` - HTTP API handlers (Axum)
//! - `store` - In-memory users and communities

pub mod api;
pub mod auth;
pub mod code;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod password;
pub mod state;
pub mod store;
pub mod telemetry;
