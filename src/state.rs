// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{TokenIssuer, TokenVerifier};
use crate::config::{AppConfig, ConfigError};
use crate::id::{IdAllocator, SharedClock, SystemClock};
use crate::password::PasswordHasher;
use crate::store::InMemoryStore;

/// Shared handles for every request.
///
/// The allocator and the token pair are built once at startup and never
/// replaced; cloning the state only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub ids: Arc<IdAllocator<SharedClock>>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub passwords: Arc<PasswordHasher>,
}

impl AppState {
    pub fn new(
        store: InMemoryStore,
        ids: IdAllocator<SharedClock>,
        issuer: TokenIssuer,
        verifier: TokenVerifier,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            ids: Arc::new(ids),
            issuer: Arc::new(issuer),
            verifier: Arc::new(verifier),
            passwords: Arc::new(passwords),
        }
    }

    /// Build the state from configuration, seeding communities into a fresh
    /// store. Fails if the allocator settings are invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let clock: SharedClock = Arc::new(SystemClock::new());
        let ids = IdAllocator::with_clock(&config.start_time, config.machine_id, clock)?;

        let mut store = InMemoryStore::new();
        for seed in &config.seed_communities {
            store.insert_community(seed.name.clone(), seed.introduction.clone());
        }

        Ok(Self::new(
            store,
            ids,
            TokenIssuer::new(&config.token),
            TokenVerifier::new(&config.token),
            PasswordHasher::new(config.password_pepper.as_bytes()),
        ))
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::for_tests_with_clock(Arc::new(SystemClock::new()))
    }

    #[cfg(test)]
    pub(crate) fn for_tests_with_clock(clock: SharedClock) -> Self {
        use crate::auth::{SigningSecret, TokenConfig};

        let token = TokenConfig {
            secret: SigningSecret::new("test-secret"),
            ttl_hours: 24,
            issuer: "bluebell".to_string(),
        };
        let ids =
            IdAllocator::with_clock("2024-01-01", 1, clock).expect("valid allocator settings");

        Self::new(
            InMemoryStore::new(),
            ids,
            TokenIssuer::new(&token),
            TokenVerifier::new(&token),
            PasswordHasher::new("test-pepper"),
        )
    }
}
