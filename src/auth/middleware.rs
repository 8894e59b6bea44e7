// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth gate middleware for Axum.
//!
//! Mounted with `route_layer` on every protected route:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/community", get(community::list_communities))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! ## Outcomes
//!
//! | Request | Result |
//! |---------|--------|
//! | no (or empty) `Authorization` header | 1006 login required |
//! | header not `Bearer <token>` | 1007 invalid token |
//! | token malformed, forged, expired, or foreign issuer | 1007 invalid token |
//! | valid token | [`AuthenticatedUser`] inserted into extensions, handler runs |
//!
//! Every rejection logs one line with a `reason` field. Acceptance is silent.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::token::TokenVerifier;
use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw token from `Authorization: Bearer <token>`.
///
/// The prefix is case-sensitive and separated by exactly one space. The token
/// itself may be empty; the verifier rejects it.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingCredential),
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidScheme)?;
    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidScheme)
}

/// Run the gate over request headers.
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
) -> Result<AuthenticatedUser, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verifier.verify(token)?;
    Ok(AuthenticatedUser::from(claims))
}

pub(crate) fn log_rejection(err: &AuthError, path: &str) {
    tracing::info!(reason = err.reason(), path, "Request rejected: {err}");
}

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.verifier) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            log_rejection(&err, request.uri().path());
            err.into_response()
        }
    }
}
