// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Business rules for advertisements and favorites.
//!
//! These checks are pure: handlers load the counts and records they need
//! from storage and pass them in.

use thiserror::Error;

use crate::storage::{Advertisement, AdvertisementStatus};

/// Maximum number of OPEN advertisements a creator may hold at once.
pub const MAX_OPEN_ADVERTISEMENTS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("You cannot have more than {limit} open advertisements")]
    QuotaExceeded { limit: usize },
    #[error("Your advertisement is already open")]
    AlreadyOpen,
    #[error("You cannot add your own advertisement to favorites")]
    OwnAdvertisement,
    #[error("The advertisement is already in your favorites")]
    AlreadyFavorited,
    #[error("Title must not be blank")]
    BlankTitle,
}

/// Check a new advertisement against the creator's open quota.
///
/// `open_count` is the number of OPEN advertisements the requester holds.
pub fn validate_create(
    open_count: usize,
    status: AdvertisementStatus,
) -> Result<(), ValidationError> {
    if status == AdvertisementStatus::Open && open_count >= MAX_OPEN_ADVERTISEMENTS {
        return Err(ValidationError::QuotaExceeded {
            limit: MAX_OPEN_ADVERTISEMENTS,
        });
    }
    Ok(())
}

/// Check a status transition on an existing advertisement.
///
/// Only a request that sets the status to OPEN is constrained.
pub fn validate_update(
    current: AdvertisementStatus,
    requested: Option<AdvertisementStatus>,
    open_count: usize,
) -> Result<(), ValidationError> {
    if requested != Some(AdvertisementStatus::Open) {
        return Ok(());
    }
    if current == AdvertisementStatus::Open {
        return Err(ValidationError::AlreadyOpen);
    }
    if open_count >= MAX_OPEN_ADVERTISEMENTS {
        return Err(ValidationError::QuotaExceeded {
            limit: MAX_OPEN_ADVERTISEMENTS,
        });
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(())
}

/// Check that `user_id` may add `advertisement` to their favorites.
pub fn validate_favorite(
    advertisement: &Advertisement,
    user_id: &str,
    already_favorited: bool,
) -> Result<(), ValidationError> {
    if advertisement.creator == user_id {
        return Err(ValidationError::OwnAdvertisement);
    }
    if already_favorited {
        return Err(ValidationError::AlreadyFavorited);
    }
    Ok(())
}
