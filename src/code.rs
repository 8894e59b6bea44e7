// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stable response codes carried in every API envelope.
//!
//! Clients branch on `code`, not on the HTTP status or the message text. The
//! numeric values are part of the public contract and must never be reused.

use axum::http::StatusCode;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum ResCode {
    Success = 1000,
    InvalidParam = 1001,
    UserExist = 1002,
    UserNotExist = 1003,
    InvalidPassword = 1004,
    ServerBusy = 1005,
    NeedLogin = 1006,
    InvalidToken = 1007,
    CommunityNotExist = 1008,
}

impl ResCode {
    pub const fn as_i64(self) -> i64 {
        self as i64
    }

    /// Default message for this code.
    pub const fn msg(self) -> &'static str {
        match self {
            ResCode::Success => "success",
            ResCode::InvalidParam => "invalid param",
            ResCode::UserExist => "user already exists",
            ResCode::UserNotExist => "user does not exist",
            ResCode::InvalidPassword => "invalid username or password",
            ResCode::ServerBusy => "server busy",
            ResCode::NeedLogin => "login required",
            ResCode::InvalidToken => "invalid token",
            ResCode::CommunityNotExist => "community does not exist",
        }
    }

    /// HTTP status used when this code is returned.
    pub const fn status_code(self) -> StatusCode {
        match self {
            ResCode::Success => StatusCode::OK,
            ResCode::InvalidParam => StatusCode::BAD_REQUEST,
            ResCode::UserExist => StatusCode::CONFLICT,
            ResCode::UserNotExist | ResCode::CommunityNotExist => StatusCode::NOT_FOUND,
            ResCode::InvalidPassword | ResCode::NeedLogin | ResCode::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ResCode::ServerBusy => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Serialize for ResCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}
