// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::JwksManager;
use crate::storage::JsonStorage;

/// Token verification settings.
///
/// Without a JWKS manager the server runs in development mode and accepts
/// unsigned tokens.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub jwks: Option<Arc<JwksManager>>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn verified(jwks: JwksManager, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            jwks: Some(Arc::new(jwks)),
            issuer,
            audience,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<JsonStorage>,
    pub auth_config: AuthConfig,
    /// Serializes read-then-write sequences (quota and favorite checks).
    pub mutations: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(storage: JsonStorage) -> Self {
        Self {
            storage: Arc::new(storage),
            auth_config: AuthConfig::default(),
            mutations: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }
}
