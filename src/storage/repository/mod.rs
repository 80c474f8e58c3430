// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to storage.

pub mod advertisements;
pub mod favorites;

pub use advertisements::{
    Advertisement, AdvertisementQuery, AdvertisementRepository, AdvertisementStatus,
};
pub use favorites::{FavoriteAdvertisement, FavoriteRepository};
