// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Advertisement CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::extract::{ApiJson, ApiQuery};
use crate::{
    auth::{authorize, Action, Auth, AuthenticatedUser, OptionalAuth},
    error::ApiError,
    models::{
        AdvertisementFilter, CreateAdvertisementRequest, PatchAdvertisementRequest,
        UpdateAdvertisementRequest,
    },
    state::AppState,
    storage::{Advertisement, AdvertisementRepository, FavoriteRepository},
    validation::{validate_create, validate_title, validate_update},
};

#[utoipa::path(
    get,
    path = "/v1/advertisements",
    params(AdvertisementFilter),
    tag = "Advertisements",
    responses(
        (status = 200, description = "Advertisements visible to the requester", body = [Advertisement]),
        (status = 401, description = "Invalid bearer token")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn list_advertisements(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    ApiQuery(filter): ApiQuery<AdvertisementFilter>,
) -> Result<Json<Vec<Advertisement>>, ApiError> {
    authorize(Action::List, viewer.as_ref(), None)?;

    let repo = AdvertisementRepository::new(state.storage());
    let advertisements = repo.list_visible(viewer.as_ref(), &filter.into())?;
    Ok(Json(advertisements))
}

#[utoipa::path(
    get,
    path = "/v1/advertisements/{advertisement_id}",
    params(
        ("advertisement_id" = String, Path, description = "Advertisement ID")
    ),
    tag = "Advertisements",
    responses(
        (status = 200, body = Advertisement),
        (status = 404, description = "Advertisement not found")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn get_advertisement(
    Path(advertisement_id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
) -> Result<Json<Advertisement>, ApiError> {
    let repo = AdvertisementRepository::new(state.storage());
    let advertisement = repo.get_visible(&advertisement_id, viewer.as_ref())?;
    authorize(Action::Retrieve, viewer.as_ref(), Some(&advertisement))?;
    Ok(Json(advertisement))
}

#[utoipa::path(
    post,
    path = "/v1/advertisements",
    request_body = CreateAdvertisementRequest,
    tag = "Advertisements",
    responses(
        (status = 201, description = "Advertisement created", body = Advertisement),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_advertisement(
    State(state): State<AppState>,
    Auth(user): Auth,
    ApiJson(request): ApiJson<CreateAdvertisementRequest>,
) -> Result<(StatusCode, Json<Advertisement>), ApiError> {
    authorize(Action::Create, Some(&user), None)?;
    validate_title(&request.title)?;
    let status = request.status.unwrap_or_default();

    let _guard = state.mutations.lock().await;
    let repo = AdvertisementRepository::new(state.storage());
    validate_create(repo.count_open_by_creator(&user.user_id)?, status)?;

    let now = Utc::now();
    let advertisement = Advertisement {
        id: uuid::Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description.unwrap_or_default(),
        creator: user.user_id.clone(),
        status,
        created_at: now,
        updated_at: now,
    };
    repo.create(&advertisement)?;

    tracing::info!(
        advertisement_id = %advertisement.id,
        creator = %advertisement.creator,
        status = %advertisement.status,
        "Advertisement created"
    );

    Ok((StatusCode::CREATED, Json(advertisement)))
}

#[utoipa::path(
    put,
    path = "/v1/advertisements/{advertisement_id}",
    params(
        ("advertisement_id" = String, Path, description = "Advertisement ID")
    ),
    request_body = UpdateAdvertisementRequest,
    tag = "Advertisements",
    responses(
        (status = 200, body = Advertisement),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the creator or staff"),
        (status = 404, description = "Advertisement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_advertisement(
    Path(advertisement_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
    ApiJson(request): ApiJson<UpdateAdvertisementRequest>,
) -> Result<Json<Advertisement>, ApiError> {
    let advertisement =
        apply_changes(&state, &user, &advertisement_id, Action::Update, request.into()).await?;
    Ok(Json(advertisement))
}

#[utoipa::path(
    patch,
    path = "/v1/advertisements/{advertisement_id}",
    params(
        ("advertisement_id" = String, Path, description = "Advertisement ID")
    ),
    request_body = PatchAdvertisementRequest,
    tag = "Advertisements",
    responses(
        (status = 200, body = Advertisement),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the creator or staff"),
        (status = 404, description = "Advertisement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn partial_update_advertisement(
    Path(advertisement_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
    ApiJson(request): ApiJson<PatchAdvertisementRequest>,
) -> Result<Json<Advertisement>, ApiError> {
    let advertisement =
        apply_changes(&state, &user, &advertisement_id, Action::PartialUpdate, request).await?;
    Ok(Json(advertisement))
}

/// Shared body of PUT and PATCH.
///
/// The quota counts OPEN advertisements of the creator, which differs from
/// the requester when staff edit someone else's advertisement.
async fn apply_changes(
    state: &AppState,
    user: &AuthenticatedUser,
    advertisement_id: &str,
    action: Action,
    changes: PatchAdvertisementRequest,
) -> Result<Advertisement, ApiError> {
    let _guard = state.mutations.lock().await;
    let repo = AdvertisementRepository::new(state.storage());

    let mut advertisement = repo.get_visible(advertisement_id, Some(user))?;
    authorize(action, Some(user), Some(&advertisement))?;

    if let Some(title) = &changes.title {
        validate_title(title)?;
    }
    if changes.status.is_some() {
        let open_count = repo.count_open_by_creator(&advertisement.creator)?;
        validate_update(advertisement.status, changes.status, open_count)?;
    }

    if let Some(title) = changes.title {
        advertisement.title = title;
    }
    if let Some(description) = changes.description {
        advertisement.description = description;
    }
    if let Some(status) = changes.status {
        advertisement.status = status;
    }
    advertisement.updated_at = Utc::now();
    repo.update(&advertisement)?;

    tracing::info!(
        advertisement_id = %advertisement.id,
        user_id = %user.user_id,
        status = %advertisement.status,
        "Advertisement updated"
    );

    Ok(advertisement)
}

#[utoipa::path(
    delete,
    path = "/v1/advertisements/{advertisement_id}",
    params(
        ("advertisement_id" = String, Path, description = "Advertisement ID")
    ),
    tag = "Advertisements",
    responses(
        (status = 204, description = "Advertisement deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the creator or staff"),
        (status = 404, description = "Advertisement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_advertisement(
    Path(advertisement_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<StatusCode, ApiError> {
    let _guard = state.mutations.lock().await;
    let repo = AdvertisementRepository::new(state.storage());

    let advertisement = repo.get_visible(&advertisement_id, Some(&user))?;
    authorize(Action::Destroy, Some(&user), Some(&advertisement))?;

    repo.delete(&advertisement.id)?;
    let unlinked = FavoriteRepository::new(state.storage()).delete_by_advertisement(&advertisement.id)?;

    tracing::info!(
        advertisement_id = %advertisement.id,
        user_id = %user.user_id,
        favorites_removed = unlinked,
        "Advertisement deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
