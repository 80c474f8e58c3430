// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication and per-action authorization.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. Server:
//!    - Fetches the identity provider's JWKS via HTTPS (when configured)
//!    - Verifies JWT signature, expiry, issuer, audience
//!    - Extracts:
//!      - `sub` → canonical `user_id`
//!      - `publicMetadata.role` → [`Role`]
//! 3. Handlers apply [`permissions::authorize`] for the requested action
//!
//! ## Security
//!
//! - Reads are open to anonymous requesters; everything else needs a token
//! - JWT verification uses HTTPS-only JWKS fetching
//! - JWKS is cached with TTL
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod permissions;
pub mod roles;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use jwks::JwksManager;
pub use permissions::{authorize, Action};
pub use roles::Role;
