// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use `Auth` in handlers that require an identity and `OptionalAuth` in
//! handlers that also serve anonymous requesters:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Validation};

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};
use crate::state::{AppState, AuthConfig};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Extractor for authenticated users.
///
/// ## Authentication Modes
///
/// - **Verified mode** (`JWKS_URL` set): full JWT verification against the JWKS
/// - **Development mode** (no `JWKS_URL`): claims decoded without signature check
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // An upstream layer may already have resolved the identity.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(parts)?.ok_or(AuthError::MissingAuthHeader)?;
        let user = verify_jwt(token, &state.auth_config).await?;
        parts.extensions.insert(user.clone());

        Ok(Auth(user))
    }
}

/// Optional authentication extractor.
///
/// Yields `None` when no `Authorization` header is sent. A header that is
/// present but invalid is still rejected.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if parts.extensions.get::<AuthenticatedUser>().is_none() && !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalAuth(None));
        }

        let Auth(user) = Auth::from_request_parts(parts, state).await?;
        Ok(OptionalAuth(Some(user)))
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)?;

    Ok(Some(token))
}

async fn verify_jwt(token: &str, auth_config: &AuthConfig) -> Result<AuthenticatedUser, AuthError> {
    match &auth_config.jwks {
        Some(_) => verify_jwt_production(token, auth_config).await,
        None => verify_jwt_development(token),
    }
}

/// Signature, expiry, issuer and audience checks against the JWKS.
async fn verify_jwt_production(
    token: &str,
    auth_config: &AuthConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let jwks = auth_config
        .jwks
        .as_ref()
        .ok_or_else(|| AuthError::InternalError("JWKS not configured".to_string()))?;

    let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
    let (decoding_key, algorithm) = jwks.decoding_key(header.kid.as_deref()).await?;

    let mut validation = Validation::new(algorithm);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    if let Some(issuer) = &auth_config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &auth_config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            ErrorKind::InvalidAudience => AuthError::InvalidAudience,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            _ => AuthError::MalformedToken,
        }
    })?;

    Ok(AuthenticatedUser::from_claims(token_data.claims))
}

/// Development verification: no signature check, expiry still enforced.
fn verify_jwt_development(token: &str) -> Result<AuthenticatedUser, AuthError> {
    let token_data = jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token)
        .map_err(|_| AuthError::MalformedToken)?;
    let claims = token_data.claims;

    let now = chrono::Utc::now().timestamp();
    if claims.exp > 0 && claims.exp < now - CLOCK_SKEW_LEEWAY as i64 {
        return Err(AuthError::TokenExpired);
    }
    if claims.sub.trim().is_empty() {
        return Err(AuthError::MalformedToken);
    }

    Ok(AuthenticatedUser::from_claims(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::state::AppState;
    use crate::storage::{JsonStorage, StoragePaths};
    use axum::http::Request;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use tempfile::TempDir;

    /// Test AppState with no JWKS (development mode).
    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize storage");
        (AppState::new(storage), temp_dir)
    }

    /// Unsigned test token; development mode ignores the signature.
    fn create_test_jwt(claims: &str) -> String {
        let header = r#"{"alg":"RS256","typ":"JWT"}"#;
        format!(
            "{}.{}.fake_signature",
            URL_SAFE_NO_PAD.encode(header.as_bytes()),
            URL_SAFE_NO_PAD.encode(claims.as_bytes())
        )
    }

    fn parts_with_auth(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwYXNz".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_jwt() {
        let (state, _temp_dir) = create_test_state();
        let token = create_test_jwt(
            r#"{"sub":"user_123","exp":9999999999,"iss":"test","sid":"sess_123","publicMetadata":{"role":"staff"}}"#,
        );
        let mut parts = parts_with_auth(Some(format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.session_id.as_deref(), Some("sess_123"));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_expired_token() {
        let (state, _temp_dir) = create_test_state();
        let token = create_test_jwt(r#"{"sub":"user_123","exp":1000}"#);
        let mut parts = parts_with_auth(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_garbage_token() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(Some("Bearer not-a-jwt".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(None);

        let user = AuthenticatedUser {
            user_id: "user_from_extension".to_string(),
            role: Role::Superuser,
            session_id: None,
            issuer: "middleware".to_string(),
            expires_at: 0,
        };
        parts.extensions.insert(user);

        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(resolved.user_id, "user_from_extension");
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(None);

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn optional_auth_resolves_valid_token() {
        let (state, _temp_dir) = create_test_state();
        let token = create_test_jwt(r#"{"sub":"user_9","exp":9999999999}"#);
        let mut parts = parts_with_auth(Some(format!("Bearer {token}")));

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.user_id).as_deref(), Some("user_9"));
    }

    #[tokio::test]
    async fn optional_auth_rejects_invalid_token() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_auth(Some("Bearer ".to_string()));

        let result = OptionalAuth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }
}
