// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: sign-up, login, lookup.

use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::{
    auth::{Auth, AuthenticatedUser},
    code::ResCode,
    error::ApiError,
    models::{
        ApiResponse, LoginRequest, LoginResponse, SignUpRequest, User, UserSearchQuery,
        UserSummary,
    },
    state::AppState,
};

/// Longest a sign-up waits for the ID allocator before answering 1005.
pub const ID_WAIT_BUDGET: Duration = Duration::from_millis(50);

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignUpRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Missing field or passwords differ"),
        (status = 409, description = "Username taken"),
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Sign-up with invalid body");
        ApiError::invalid_param(rejection.body_text())
    })?;
    request.validate()?;

    let password_hash = state.passwords.hash(&request.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        ApiError::server_busy()
    })?;

    // Allocated before taking the store lock, so a stalled clock never blocks readers.
    let user_id = state.ids.generate_within(ID_WAIT_BUDGET).map_err(|e| {
        tracing::error!(error = %e, "User ID allocation failed");
        ApiError::server_busy()
    })?;

    // Usernames are stored trimmed; login and search trim their input the same way.
    let username = request.username.trim().to_string();
    let mut store = state.store.write().await;
    if store.user_exists(&username) {
        return Err(ApiError::new(ResCode::UserExist));
    }
    store.insert_user(User {
        user_id,
        username,
        password_hash,
    })?;

    tracing::info!(%user_id, "User registered");
    Ok(ApiResponse::empty())
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown username"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Login with invalid body");
        ApiError::invalid_param(rejection.body_text())
    })?;
    request.validate()?;

    let user = state.store.read().await.user_by_username(request.username.trim())?;
    if !state.passwords.verify(&request.password, &user.password_hash) {
        tracing::info!(user_id = %user.user_id, "Login with wrong password");
        return Err(ApiError::new(ResCode::InvalidPassword));
    }

    let token = state
        .issuer
        .issue(user.user_id.as_i64(), &user.username)
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, error = %e, "Token issuance failed");
            ApiError::server_busy()
        })?;

    Ok(ApiResponse::success(LoginResponse {
        user_id: user.user_id,
        user_name: user.username,
        token,
    }))
}

/// Look up a user by exact username.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    params(UserSearchQuery),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User found", body = UserSummary),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown username"),
    )
)]
pub async fn search_user(
    State(state): State<AppState>,
    Auth(caller): Auth,
    query: Result<Query<UserSearchQuery>, QueryRejection>,
) -> Result<ApiResponse<UserSummary>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::invalid_param(rejection.body_text()))?;
    let username = query.username.trim();
    if username.is_empty() {
        return Err(ApiError::invalid_param("username is required"));
    }

    tracing::debug!(caller = %caller.user_id, username, "User search");
    let user = state.store.read().await.user_by_username(username)?;
    Ok(ApiResponse::success(UserSummary::from(&user)))
}

/// Identity attached to the current token.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = AuthenticatedUser),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn current_user(Auth(user): Auth) -> ApiResponse<AuthenticatedUser> {
    ApiResponse::success(user)
}
