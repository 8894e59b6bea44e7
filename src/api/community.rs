// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::extract::{Path, State};

use crate::{
    error::ApiError,
    models::{ApiResponse, CommunityDetail, CommunitySummary},
    state::AppState,
};

/// List all communities. An empty list is returned as `data: null`.
#[utoipa::path(
    get,
    path = "/api/v1/community",
    tag = "Community",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [CommunitySummary]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_communities(State(state): State<AppState>) -> ApiResponse<Vec<CommunitySummary>> {
    let communities = state.store.read().await.list_communities();
    if communities.is_empty() {
        ApiResponse::empty()
    } else {
        ApiResponse::success(communities)
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/community/{id}",
    params(
        ("id" = i64, Path, description = "Community id")
    ),
    tag = "Community",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CommunityDetail),
        (status = 400, description = "Id is not an integer"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown community"),
    )
)]
pub async fn community_detail(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<ApiResponse<CommunityDetail>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::invalid_param(format!("invalid community id `{id}`")))?;

    let detail = state.store.read().await.community_detail(id)?;
    Ok(ApiResponse::success(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ResCode;

    #[tokio::test]
    async fn empty_list_has_null_data() {
        let state = AppState::for_tests();
        let response = list_communities(State(state)).await;
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn list_and_detail() {
        let state = AppState::for_tests();
        let go = state.store.write().await.insert_community("go", "Golang");

        let list = list_communities(State(state.clone())).await.data.unwrap();
        assert_eq!(list, vec![CommunitySummary { id: go.id, name: "go".into() }]);

        let detail = community_detail(Path(go.id.to_string()), State(state))
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(detail, go);
    }

    #[tokio::test]
    async fn detail_errors() {
        let state = AppState::for_tests();

        let err = community_detail(Path("abc".into()), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ResCode::InvalidParam);

        let err = community_detail(Path("42".into()), State(state)).await.unwrap_err();
        assert_eq!(err.code, ResCode::CommunityNotExist);
    }
}
