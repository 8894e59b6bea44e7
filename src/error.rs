// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::response::{IntoResponse, Response};

use crate::code::ResCode;
use crate::models::ApiResponse;

/// Handler error, rendered as an envelope with `data: null`.
#[derive(Debug)]
pub struct ApiError {
    pub code: ResCode,
    pub message: String,
}

impl ApiError {
    /// Error with the code's default message.
    pub fn new(code: ResCode) -> Self {
        Self::with_message(code, code.msg())
    }

    pub fn with_message(code: ResCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::with_message(ResCode::InvalidParam, message)
    }

    pub fn server_busy() -> Self {
        Self::new(ResCode::ServerBusy)
    }
}

impl From<ResCode> for ApiError {
    fn from(code: ResCode) -> Self {
        Self::new(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ApiResponse::<()> {
            code: self.code,
            msg: self.message,
            data: None,
        };
        (status, axum::Json(body)).into_response()
    }
}
