// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for advertisements and favorite links, kept as one
//! JSON file per record below the configured data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   advertisements/
//!     {advertisement_id}.json
//!   favorites/
//!     {favorite_id}.json
//! ```
//!
//! Records are written atomically (temp file + rename). There is no
//! cross-record transaction; callers that need read-then-write consistency
//! hold the mutation gate in [`crate::state::AppState`].

pub mod fs;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use fs::{JsonStorage, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{
    Advertisement, AdvertisementQuery, AdvertisementRepository, AdvertisementStatus,
    FavoriteAdvertisement, FavoriteRepository,
};
