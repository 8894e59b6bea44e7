// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::id::SnowflakeId;

/// Claims carried in a session token.
///
/// `exp` and `iss` use the registered JWT names so the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    /// Expiration, Unix seconds.
    pub exp: i64,
    pub iss: String,
}

/// Identity attached to a request once the auth gate accepts it.
///
/// Inserted into request extensions; the type itself is the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Snowflake user ID, as a decimal string.
    #[schema(value_type = String)]
    pub user_id: SnowflakeId,
    pub username: String,
    /// Token expiration (Unix seconds).
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: SnowflakeId::from_i64(claims.user_id),
            username: claims.username,
            expires_at: claims.exp,
        }
    }
}
