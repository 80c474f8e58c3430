// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Stored records
//! ([`Advertisement`]) are returned as-is; the types here cover what clients
//! send and the composite favorites view.
//!
//! `creator`, `id` and the timestamps are never accepted from clients.
//! Unknown body fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::storage::{Advertisement, AdvertisementQuery, AdvertisementStatus};

// =============================================================================
// Advertisement Requests
// =============================================================================

/// Body of `POST /v1/advertisements`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdvertisementRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `OPEN`.
    #[serde(default)]
    pub status: Option<AdvertisementStatus>,
}

/// Body of `PUT /v1/advertisements/{id}`.
///
/// `title` is required; omitted optional fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdvertisementRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<AdvertisementStatus>,
}

/// Body of `PATCH /v1/advertisements/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatchAdvertisementRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<AdvertisementStatus>,
}

impl From<UpdateAdvertisementRequest> for PatchAdvertisementRequest {
    fn from(request: UpdateAdvertisementRequest) -> Self {
        Self {
            title: Some(request.title),
            description: request.description,
            status: request.status,
        }
    }
}

// =============================================================================
// Listing Filters
// =============================================================================

/// Query parameters of `GET /v1/advertisements`. All filters combine with AND.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdvertisementFilter {
    /// Only advertisements with this status.
    pub status: Option<AdvertisementStatus>,
    /// Only advertisements created by this user ID.
    pub creator: Option<String>,
    /// Created at or after this instant (RFC 3339).
    pub created_at_after: Option<DateTime<Utc>>,
    /// Created at or before this instant (RFC 3339).
    pub created_at_before: Option<DateTime<Utc>>,
}

impl From<AdvertisementFilter> for AdvertisementQuery {
    fn from(filter: AdvertisementFilter) -> Self {
        Self {
            status: filter.status,
            creator: filter.creator,
            created_at_after: filter.created_at_after,
            created_at_before: filter.created_at_before,
        }
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// A user together with favorited advertisements.
///
/// Returned by both favorite endpoints. After adding a favorite the list
/// holds only the advertisement just added.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FavoritesResponse {
    /// User ID of the requester.
    pub user: String,
    pub favorite_advertisement: Vec<Advertisement>,
}
