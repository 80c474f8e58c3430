// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Favorite repository.
//!
//! A favorite links one user to one advertisement. Each link is stored as a
//! separate JSON file under `favorites/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{JsonStorage, StorageError, StorageResult};

/// A user's favorite advertisement link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteAdvertisement {
    /// Unique link identifier (UUID).
    pub id: String,
    /// User who marked the advertisement.
    pub user_id: String,
    pub advertisement_id: String,
    pub created_at: DateTime<Utc>,
}

impl FavoriteAdvertisement {
    pub fn new(user_id: impl Into<String>, advertisement_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            advertisement_id: advertisement_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Repository for favorite link operations.
pub struct FavoriteRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    pub fn create(&self, favorite: &FavoriteAdvertisement) -> StorageResult<()> {
        let path = self.storage.paths().favorite(&favorite.id);
        if self.storage.exists(&path) {
            return Err(StorageError::AlreadyExists(format!(
                "Favorite {}",
                favorite.id
            )));
        }
        self.storage.write_json(path, favorite)
    }

    fn list_all(&self) -> StorageResult<Vec<FavoriteAdvertisement>> {
        self.storage.read_all(self.storage.paths().favorites_dir())
    }

    /// Favorite links of `user_id`, oldest first.
    pub fn list_by_user(&self, user_id: &str) -> StorageResult<Vec<FavoriteAdvertisement>> {
        let mut favorites: Vec<FavoriteAdvertisement> = self
            .list_all()?
            .into_iter()
            .filter(|favorite| favorite.user_id == user_id)
            .collect();
        favorites.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(favorites)
    }

    /// Whether `user_id` has already favorited `advertisement_id`.
    pub fn is_favorited(&self, user_id: &str, advertisement_id: &str) -> StorageResult<bool> {
        let favorites: Vec<FavoriteAdvertisement> = self
            .storage
            .read_all_strict(self.storage.paths().favorites_dir())?;
        Ok(favorites.iter().any(|favorite| {
            favorite.user_id == user_id && favorite.advertisement_id == advertisement_id
        }))
    }

    /// Remove every link pointing at `advertisement_id`. Returns how many
    /// links were removed.
    pub fn delete_by_advertisement(&self, advertisement_id: &str) -> StorageResult<usize> {
        let mut removed = 0;
        for favorite in self.list_all()? {
            if favorite.advertisement_id == advertisement_id {
                self.storage
                    .delete(self.storage.paths().favorite(&favorite.id))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
