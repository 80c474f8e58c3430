// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{AuthenticatedUser, Role},
    models::{
        CreateAdvertisementRequest, FavoritesResponse, PatchAdvertisementRequest,
        UpdateAdvertisementRequest,
    },
    state::AppState,
    storage::{Advertisement, AdvertisementStatus},
};

pub mod advertisements;
pub mod extract;
pub mod favorites;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/advertisements",
            get(advertisements::list_advertisements).post(advertisements::create_advertisement),
        )
        .route(
            "/advertisements/getfavorites",
            get(favorites::list_favorites),
        )
        .route(
            "/advertisements/{advertisement_id}",
            get(advertisements::get_advertisement)
                .put(advertisements::update_advertisement)
                .patch(advertisements::partial_update_advertisement)
                .delete(advertisements::delete_advertisement),
        )
        .route(
            "/advertisements/{advertisement_id}/addfavorites",
            post(favorites::add_favorite),
        );

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Registers the bearer token scheme referenced by the handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Classifieds API",
        description = "Advertisements with ownership rules, open quotas and favorites."
    ),
    paths(
        advertisements::list_advertisements,
        advertisements::get_advertisement,
        advertisements::create_advertisement,
        advertisements::update_advertisement,
        advertisements::partial_update_advertisement,
        advertisements::delete_advertisement,
        favorites::add_favorite,
        favorites::list_favorites,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Advertisement,
            AdvertisementStatus,
            CreateAdvertisementRequest,
            UpdateAdvertisementRequest,
            PatchAdvertisementRequest,
            FavoritesResponse,
            AuthenticatedUser,
            Role,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Advertisements", description = "Advertisement management"),
        (name = "Favorites", description = "Favorite advertisements of the requester"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStorage, StoragePaths};
    use tempfile::TempDir;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(StoragePaths::new(temp_dir.path()));
        let app = router(AppState::new(storage));
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_documents_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/advertisements"));
        assert!(doc.paths.paths.contains_key("/v1/advertisements/{advertisement_id}"));
        assert!(doc
            .paths
            .paths
            .contains_key("/v1/advertisements/{advertisement_id}/addfavorites"));
        assert!(doc.paths.paths.contains_key("/v1/advertisements/getfavorites"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("Advertisement"));
    }
}
