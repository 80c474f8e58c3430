// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Advertisement repository.
//!
//! Each advertisement is stored as a separate JSON file under
//! `advertisements/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{JsonStorage, OwnedResource, StorageError, StorageResult};
use crate::auth::AuthenticatedUser;

/// Publication status of an advertisement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertisementStatus {
    /// Visible only to its creator.
    Draft,
    /// Published; counts against the creator's open quota.
    #[default]
    Open,
    /// Published but no longer active.
    Closed,
}

impl std::fmt::Display for AdvertisementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvertisementStatus::Draft => write!(f, "DRAFT"),
            AdvertisementStatus::Open => write!(f, "OPEN"),
            AdvertisementStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// An advertisement as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Advertisement {
    /// Unique advertisement identifier (UUID).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// User ID of the creator. Assigned on creation, never changed.
    pub creator: String,
    pub status: AdvertisementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    /// Whether `viewer` may see this advertisement.
    ///
    /// Anonymous viewers see everything except drafts. Authenticated viewers
    /// additionally see their own drafts.
    pub fn is_visible_to(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match self.status {
            AdvertisementStatus::Open | AdvertisementStatus::Closed => true,
            AdvertisementStatus::Draft => viewer.is_some_and(|user| user.user_id == self.creator),
        }
    }
}

impl OwnedResource for Advertisement {
    fn owner_user_id(&self) -> &str {
        &self.creator
    }

    fn resource_label(&self) -> String {
        format!("advertisement {}", self.id)
    }
}

/// Criteria for narrowing an advertisement listing. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisementQuery {
    pub status: Option<AdvertisementStatus>,
    pub creator: Option<String>,
    pub created_at_after: Option<DateTime<Utc>>,
    pub created_at_before: Option<DateTime<Utc>>,
}

impl AdvertisementQuery {
    pub fn matches(&self, advertisement: &Advertisement) -> bool {
        self.status.is_none_or(|status| advertisement.status == status)
            && self
                .creator
                .as_deref()
                .is_none_or(|creator| advertisement.creator == creator)
            && self
                .created_at_after
                .is_none_or(|after| advertisement.created_at >= after)
            && self
                .created_at_before
                .is_none_or(|before| advertisement.created_at <= before)
    }
}

/// Repository for advertisement operations.
pub struct AdvertisementRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> AdvertisementRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, advertisement_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().advertisement(advertisement_id))
    }

    /// Get an advertisement by ID.
    pub fn get(&self, advertisement_id: &str) -> StorageResult<Advertisement> {
        // Identifiers become file names.
        if !is_valid_id(advertisement_id) || !self.exists(advertisement_id) {
            return Err(StorageError::NotFound(format!(
                "Advertisement {advertisement_id}"
            )));
        }
        self.storage
            .read_json(self.storage.paths().advertisement(advertisement_id))
    }

    /// Get an advertisement only if `viewer` may see it.
    ///
    /// Hidden advertisements are reported as not found.
    pub fn get_visible(
        &self,
        advertisement_id: &str,
        viewer: Option<&AuthenticatedUser>,
    ) -> StorageResult<Advertisement> {
        let advertisement = self.get(advertisement_id)?;
        if !advertisement.is_visible_to(viewer) {
            return Err(StorageError::NotFound(format!(
                "Advertisement {advertisement_id}"
            )));
        }
        Ok(advertisement)
    }

    pub fn create(&self, advertisement: &Advertisement) -> StorageResult<()> {
        let id = &advertisement.id;
        if self.exists(id) {
            return Err(StorageError::AlreadyExists(format!("Advertisement {id}")));
        }
        self.storage
            .write_json(self.storage.paths().advertisement(id), advertisement)
    }

    pub fn update(&self, advertisement: &Advertisement) -> StorageResult<()> {
        let id = &advertisement.id;
        if !self.exists(id) {
            return Err(StorageError::NotFound(format!("Advertisement {id}")));
        }
        self.storage
            .write_json(self.storage.paths().advertisement(id), advertisement)
    }

    pub fn delete(&self, advertisement_id: &str) -> StorageResult<()> {
        if !is_valid_id(advertisement_id) || !self.exists(advertisement_id) {
            return Err(StorageError::NotFound(format!(
                "Advertisement {advertisement_id}"
            )));
        }
        self.storage
            .delete(self.storage.paths().advertisement(advertisement_id))
    }

    /// All advertisements, oldest first.
    pub fn list_all(&self) -> StorageResult<Vec<Advertisement>> {
        let mut advertisements: Vec<Advertisement> = self
            .storage
            .read_all(self.storage.paths().advertisements_dir())?;
        advertisements.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(advertisements)
    }

    /// Advertisements `viewer` may see that match `query`, oldest first.
    pub fn list_visible(
        &self,
        viewer: Option<&AuthenticatedUser>,
        query: &AdvertisementQuery,
    ) -> StorageResult<Vec<Advertisement>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|ad| ad.is_visible_to(viewer) && query.matches(ad))
            .collect())
    }

    /// Number of OPEN advertisements created by `creator`.
    pub fn count_open_by_creator(&self, creator: &str) -> StorageResult<usize> {
        let advertisements: Vec<Advertisement> = self
            .storage
            .read_all_strict(self.storage.paths().advertisements_dir())?;
        Ok(advertisements
            .iter()
            .filter(|ad| ad.creator == creator && ad.status == AdvertisementStatus::Open)
            .count())
    }
}

/// Only UUID-shaped identifiers can name a stored record.
fn is_valid_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}
