// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Classifieds Server - Advertisement board API
//!
//! Users publish advertisements, may hold at most ten OPEN ones at a time,
//! and collect advertisements of other users as favorites.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer-token authentication and per-action authorization
//! - `storage` - JSON file storage, one file per record
//! - `validation` - Quota and favorite rules

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod validation;
