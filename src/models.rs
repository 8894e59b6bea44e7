// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API, plus the records kept by
//! the in-memory store.
//!
//! ## Envelope
//!
//! Every response body is wrapped in [`ApiResponse`]:
//!
//! ```json
//! { "code": 1000, "msg": "success", "data": { ... } }
//! ```
//!
//! User IDs are snowflakes and serialize as decimal strings.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::code::ResCode;
use crate::error::ApiError;
use crate::id::SnowflakeId;

// =============================================================================
// Envelope
// =============================================================================

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: ResCode,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ResCode::Success,
            msg: ResCode::Success.msg().to_string(),
            data: Some(data),
        }
    }

    /// Success with `data: null`.
    pub fn empty() -> Self {
        Self {
            code: ResCode::Success,
            msg: ResCode::Success.msg().to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code.status_code(), Json(self)).into_response()
    }
}

// =============================================================================
// Account Models
// =============================================================================

/// A registered user as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: SnowflakeId,
    pub username: String,
    /// Salted HMAC hash, never serialized.
    pub password_hash: String,
}

/// Request to create an account.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    /// Must equal `password`.
    pub re_password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("re_password", &self.re_password)?;
        if self.password != self.re_password {
            return Err(ApiError::invalid_param("re_password must match password"));
        }
        Ok(())
    }
}

/// Login credentials.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(value_type = String)]
    pub user_id: SnowflakeId,
    pub user_name: String,
    /// Bearer token for protected endpoints.
    pub token: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    #[schema(value_type = String)]
    pub user_id: SnowflakeId,
    pub user_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.username.clone(),
        }
    }
}

/// Query for `GET /api/v1/users/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct UserSearchQuery {
    /// Exact username to look up.
    pub username: String,
}

// =============================================================================
// Community Models
// =============================================================================

/// Community list entry.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct CommunitySummary {
    pub id: i64,
    pub name: String,
}

/// Full community record.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct CommunityDetail {
    pub id: i64,
    pub name: String,
    pub introduction: String,
    pub create_time: DateTime<Utc>,
}

impl From<&CommunityDetail> for CommunitySummary {
    fn from(detail: &CommunityDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name.clone(),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::invalid_param(format!("{field} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(ok, serde_json::json!({"code": 1000, "msg": "success", "data": 7}));

        let empty = serde_json::to_value(ApiResponse::<()>::empty()).unwrap();
        assert!(empty["data"].is_null());
    }

    #[test]
    fn sign_up_validation() {
        let valid = SignUpRequest {
            username: "alice".into(),
            password: "pw".into(),
            re_password: "pw".into(),
        };
        assert!(valid.validate().is_ok());

        let mismatch = SignUpRequest {
            re_password: "other".into(),
            ..valid.clone()
        };
        assert_eq!(mismatch.validate().unwrap_err().code, ResCode::InvalidParam);

        let blank = SignUpRequest {
            username: "   ".into(),
            ..valid
        };
        let err = blank.validate().unwrap_err();
        assert_eq!(err.message, "username is required");
    }

    #[test]
    fn login_response_stringifies_user_id() {
        let body = LoginResponse {
            user_id: SnowflakeId::from_i64(9_007_199_254_740_993),
            user_name: "alice".into(),
            token: "t".into(),
        };
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["user_id"], "9007199254740993");
    }
}
