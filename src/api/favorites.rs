// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{authorize, Action, Auth},
    error::ApiError,
    models::FavoritesResponse,
    state::AppState,
    storage::{AdvertisementRepository, FavoriteAdvertisement, FavoriteRepository, StorageError},
    validation::validate_favorite,
};

#[utoipa::path(
    post,
    path = "/v1/advertisements/{advertisement_id}/addfavorites",
    params(
        ("advertisement_id" = String, Path, description = "Advertisement to add to favorites")
    ),
    tag = "Favorites",
    responses(
        (status = 201, description = "Added to favorites", body = FavoritesResponse),
        (status = 400, description = "Own advertisement or already a favorite"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Advertisement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_favorite(
    Path(advertisement_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<(StatusCode, Json<FavoritesResponse>), ApiError> {
    authorize(Action::AddFavorite, Some(&user), None)?;

    let _guard = state.mutations.lock().await;
    let advertisement = AdvertisementRepository::new(state.storage())
        .get_visible(&advertisement_id, Some(&user))?;

    let favorites = FavoriteRepository::new(state.storage());
    let already_favorited = favorites.is_favorited(&user.user_id, &advertisement.id)?;
    validate_favorite(&advertisement, &user.user_id, already_favorited)?;

    favorites.create(&FavoriteAdvertisement::new(&user.user_id, &advertisement.id))?;

    tracing::info!(
        user_id = %user.user_id,
        advertisement_id = %advertisement.id,
        "Advertisement added to favorites"
    );

    Ok((
        StatusCode::CREATED,
        Json(FavoritesResponse {
            user: user.user_id,
            favorite_advertisement: vec![advertisement],
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/advertisements/getfavorites",
    tag = "Favorites",
    responses(
        (status = 200, description = "Favorited advertisements of the requester", body = FavoritesResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<FavoritesResponse>, ApiError> {
    authorize(Action::ListFavorites, Some(&user), None)?;

    let advertisements = AdvertisementRepository::new(state.storage());
    let mut favorite_advertisement = Vec::new();
    for link in FavoriteRepository::new(state.storage()).list_by_user(&user.user_id)? {
        // Links can outlive visibility, e.g. an advertisement moved back to draft.
        match advertisements.get_visible(&link.advertisement_id, Some(&user)) {
            Ok(advertisement) => favorite_advertisement.push(advertisement),
            Err(StorageError::NotFound(_)) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Json(FavoritesResponse {
        user: user.user_id,
        favorite_advertisement,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role};
    use crate::storage::{Advertisement, AdvertisementStatus, JsonStorage, StoragePaths};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("storage initializes");
        (AppState::new(storage), temp_dir)
    }

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            role: Role::User,
            session_id: None,
            issuer: "test".to_string(),
            expires_at: 0,
        }
    }

    fn seed(state: &AppState, creator: &str, status: AdvertisementStatus, age_secs: i64) -> Advertisement {
        let created_at = Utc::now() - Duration::seconds(age_secs);
        let advertisement = Advertisement {
            id: uuid::Uuid::new_v4().to_string(),
            title: format!("{creator}'s item"),
            description: String::new(),
            creator: creator.to_string(),
            status,
            created_at,
            updated_at: created_at,
        };
        AdvertisementRepository::new(state.storage())
            .create(&advertisement)
            .unwrap();
        advertisement
    }

    #[tokio::test]
    async fn add_favorite_returns_created() {
        let (state, _dir) = test_state();
        let ad = seed(&state, "alice", AdvertisementStatus::Open, 0);

        let (status, Json(body)) = add_favorite(Path(ad.id.clone()), State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.user, "bob");
        assert_eq!(body.favorite_advertisement, vec![ad.clone()]);
        assert!(FavoriteRepository::new(state.storage())
            .is_favorited("bob", &ad.id)
            .unwrap());
    }

    #[tokio::test]
    async fn own_advertisement_cannot_be_favorited() {
        let (state, _dir) = test_state();
        let ad = seed(&state, "alice", AdvertisementStatus::Open, 0);

        let err = add_favorite(Path(ad.id), State(state), Auth(user("alice")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "You cannot add your own advertisement to favorites");
    }

    #[tokio::test]
    async fn second_favorite_fails() {
        let (state, _dir) = test_state();
        let ad = seed(&state, "alice", AdvertisementStatus::Closed, 0);

        add_favorite(Path(ad.id.clone()), State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();
        let err = add_favorite(Path(ad.id), State(state), Auth(user("bob")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "The advertisement is already in your favorites");
    }

    #[tokio::test]
    async fn draft_of_another_user_is_not_found() {
        let (state, _dir) = test_state();
        let ad = seed(&state, "alice", AdvertisementStatus::Draft, 0);

        let err = add_favorite(Path(ad.id), State(state), Auth(user("bob")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_favorites_returns_linked_advertisements() {
        let (state, _dir) = test_state();
        let older = seed(&state, "alice", AdvertisementStatus::Open, 60);
        let newer = seed(&state, "carol", AdvertisementStatus::Open, 0);
        seed(&state, "dave", AdvertisementStatus::Open, 30);

        add_favorite(Path(older.id.clone()), State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();
        add_favorite(Path(newer.id.clone()), State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();

        let Json(body) = list_favorites(State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();
        assert_eq!(body.user, "bob");
        let ids: Vec<_> = body.favorite_advertisement.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![older.id.as_str(), newer.id.as_str()]);

        let Json(other) = list_favorites(State(state), Auth(user("carol"))).await.unwrap();
        assert!(other.favorite_advertisement.is_empty());
    }

    #[tokio::test]
    async fn list_favorites_skips_hidden_advertisements() {
        let (state, _dir) = test_state();
        let mut ad = seed(&state, "alice", AdvertisementStatus::Open, 0);
        add_favorite(Path(ad.id.clone()), State(state.clone()), Auth(user("bob")))
            .await
            .unwrap();

        ad.status = AdvertisementStatus::Draft;
        AdvertisementRepository::new(state.storage()).update(&ad).unwrap();

        let Json(body) = list_favorites(State(state), Auth(user("bob"))).await.unwrap();
        assert!(body.favorite_advertisement.is_empty());
    }
}
