// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, AuthenticatedUser},
    models::{CommunityDetail, CommunitySummary, LoginRequest, LoginResponse, SignUpRequest, UserSummary},
    state::AppState,
};

pub mod community;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/signup", post(users::sign_up))
        .route("/login", post(users::login));

    let protected = Router::new()
        .route("/users/search", get(users::search_user))
        .route("/users/me", get(users::current_user))
        .route("/community", get(community::list_communities))
        .route("/community/{id}", get(community::community_detail))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let v1_routes = public.merge(protected).with_state(state);

    Router::new()
        .nest("/api/v1", v1_routes)
        .route("/ping", get(health::ping))
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::sign_up,
        users::login,
        users::search_user,
        users::current_user,
        community::list_communities,
        community::community_detail,
        health::ping,
        health::health
    ),
    components(
        schemas(
            SignUpRequest,
            LoginRequest,
            LoginResponse,
            UserSummary,
            AuthenticatedUser,
            CommunitySummary,
            CommunityDetail,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Accounts and sessions"),
        (name = "Community", description = "Forum communities"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
