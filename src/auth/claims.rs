// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims read from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject, the canonical user ID.
    pub sub: String,
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub iss: String,
    /// Session ID
    #[serde(default)]
    pub sid: Option<String>,
    /// Public metadata carrying the role.
    #[serde(default, rename = "publicMetadata")]
    pub public_metadata: Option<PublicMetadata>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PublicMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated user information extracted from JWT.
///
/// This is the identity every handler sees for the requester.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Canonical user ID (`sub` claim)
    pub user_id: String,

    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(skip)]
    pub issuer: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Build the identity from verified claims.
    ///
    /// A missing or unknown role falls back to [`Role::User`].
    pub fn from_claims(claims: TokenClaims) -> Self {
        let role = claims
            .public_metadata
            .as_ref()
            .and_then(|m| m.role.as_deref())
            .and_then(Role::parse)
            .unwrap_or_default();

        Self {
            user_id: claims.sub,
            role,
            session_id: claims.sid,
            issuer: claims.iss,
            expires_at: claims.exp,
        }
    }

    /// Staff or superuser.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
