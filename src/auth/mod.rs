// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless HS256 sessions for the forum API.
//!
//! ## Auth Flow
//!
//! 1. `POST /api/v1/login` checks the password and calls [`TokenIssuer`]
//! 2. The client sends `Authorization: Bearer <token>` on every protected call
//! 3. [`require_auth`] runs [`TokenVerifier`]:
//!    - signature against the process secret
//!    - expiry (no leeway)
//!    - issuer tag
//! 4. On success the [`AuthenticatedUser`] is placed in request extensions and
//!    handlers read it with the [`Auth`] extractor
//!
//! ## Security
//!
//! - Nothing is stored server-side; revocation is by expiry only
//! - The signing secret is injected from configuration at startup
//! - Malformed input is always a typed rejection, never a panic

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::{AuthError, TokenError};
pub use extractor::Auth;
pub use middleware::require_auth;
pub use token::{SigningSecret, TokenConfig, TokenIssuer, TokenVerifier};
