// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Two levels:
//!
//! - [`TokenError`] says exactly why a credential is unusable. It never leaves
//!   the server; it is kept for tests and the rejection log line.
//! - [`AuthError`] is what the gate produces. It collapses every token failure
//!   into [`ResCode::InvalidToken`] and keeps a missing credential distinct as
//!   [`ResCode::NeedLogin`].

use axum::response::{IntoResponse, Response};
use jsonwebtoken::errors::ErrorKind;

use crate::code::ResCode;
use crate::error::ApiError;

/// Why a token failed issuance or verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not a structurally valid token (segments, base64, JSON, claims).
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the process secret, or the header names
    /// another algorithm.
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token issuer is invalid")]
    InvalidIssuer,
    /// Encoding failed while issuing.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Stable label for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "token_expired",
            TokenError::InvalidIssuer => "invalid_issuer",
            TokenError::Signing(_) => "signing_failure",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            _ => TokenError::Malformed,
        }
    }
}

/// Rejection produced by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingCredential,
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidScheme,
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    /// Stable label for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidScheme => "invalid_scheme",
            AuthError::Token(err) => err.reason(),
        }
    }

    /// Outward code. The only place token failures are coarsened.
    pub fn res_code(&self) -> ResCode {
        match self {
            AuthError::MissingCredential => ResCode::NeedLogin,
            AuthError::InvalidScheme => ResCode::InvalidToken,
            AuthError::Token(
                TokenError::Malformed
                | TokenError::InvalidSignature
                | TokenError::Expired
                | TokenError::InvalidIssuer
                | TokenError::Signing(_),
            ) => ResCode::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::new(self.res_code()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn missing_credential_returns_need_login() {
        let response = AuthError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["code"], 1006);
        assert_eq!(body["msg"], "login required");
        assert!(body["data"].is_null());
    }

    #[test]
    fn every_token_failure_collapses_to_invalid_token() {
        for err in [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::InvalidIssuer,
        ] {
            assert_eq!(AuthError::from(err).res_code(), ResCode::InvalidToken);
        }
        assert_eq!(AuthError::InvalidScheme.res_code(), ResCode::InvalidToken);
    }

    #[test]
    fn reasons_keep_the_fine_grained_kind() {
        assert_eq!(AuthError::from(TokenError::Expired).reason(), "token_expired");
        assert_eq!(AuthError::InvalidScheme.reason(), "invalid_scheme");
        assert_eq!(AuthError::MissingCredential.reason(), "missing_credential");
    }

    #[test]
    fn jwt_error_kinds_map_to_token_errors() {
        let cases = [
            (ErrorKind::InvalidSignature, TokenError::InvalidSignature),
            (ErrorKind::InvalidAlgorithm, TokenError::InvalidSignature),
            (ErrorKind::ExpiredSignature, TokenError::Expired),
            (ErrorKind::InvalidIssuer, TokenError::InvalidIssuer),
            (ErrorKind::InvalidToken, TokenError::Malformed),
        ];
        for (kind, expected) in cases {
            let err: jsonwebtoken::errors::Error = kind.into();
            assert_eq!(TokenError::from(err), expected);
        }
    }
}
