// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to read the caller's identity:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::{authenticate, log_rejection};
use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Behind [`require_auth`](super::middleware::require_auth) this only reads
/// the identity the middleware attached. On a route mounted without the
/// middleware it runs the same gate itself, so a handler taking `Auth` can
/// never run unauthenticated.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        match authenticate(&parts.headers, &state.verifier) {
            Ok(user) => Ok(Auth(user)),
            Err(err) => {
                log_rejection(&err, parts.uri.path());
                Err(err)
            }
        }
    }
}
