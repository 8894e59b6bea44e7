// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for users and communities.
//!
//! Holds the same records and answers the same questions as the SQL tables
//! (`user`, `community`) would. Shared through `AppState` behind a
//! `tokio::sync::RwLock`.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::code::ResCode;
use crate::error::ApiError;
use crate::models::{CommunityDetail, CommunitySummary, User};

#[derive(Default)]
pub struct InMemoryStore {
    /// Keyed by username, which is unique.
    users: HashMap<String, User>,
    communities: BTreeMap<i64, CommunityDetail>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn insert_user(&mut self, user: User) -> Result<(), ApiError> {
        if self.user_exists(&user.username) {
            return Err(ApiError::new(ResCode::UserExist));
        }
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    pub fn user_by_username(&self, username: &str) -> Result<User, ApiError> {
        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| ApiError::new(ResCode::UserNotExist))
    }

    /// Add a community with the next free id.
    pub fn insert_community(
        &mut self,
        name: impl Into<String>,
        introduction: impl Into<String>,
    ) -> CommunityDetail {
        let id = self.communities.keys().next_back().map_or(1, |last| last + 1);
        let community = CommunityDetail {
            id,
            name: name.into(),
            introduction: introduction.into(),
            create_time: Utc::now(),
        };
        self.communities.insert(id, community.clone());
        community
    }

    /// Communities ordered by id.
    pub fn list_communities(&self) -> Vec<CommunitySummary> {
        self.communities.values().map(CommunitySummary::from).collect()
    }

    pub fn community_detail(&self, id: i64) -> Result<CommunityDetail, ApiError> {
        self.communities
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::new(ResCode::CommunityNotExist))
    }
}
