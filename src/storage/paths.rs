// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the storage layout.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities rooted at the configured data directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all stored data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Advertisement Paths ==========

    /// Directory containing all advertisements.
    pub fn advertisements_dir(&self) -> PathBuf {
        self.root.join("advertisements")
    }

    /// Path to a specific advertisement file.
    pub fn advertisement(&self, advertisement_id: &str) -> PathBuf {
        self.advertisements_dir()
            .join(format!("{advertisement_id}.json"))
    }

    // ========== Favorite Paths ==========

    /// Directory containing all favorite links.
    pub fn favorites_dir(&self) -> PathBuf {
        self.root.join("favorites")
    }

    /// Path to a specific favorite link file.
    pub fn favorite(&self, favorite_id: &str) -> PathBuf {
        self.favorites_dir().join(format!("{favorite_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_data_dir() {
        let paths = StoragePaths::new("/srv/classifieds");

        assert_eq!(paths.root(), Path::new("/srv/classifieds"));
        assert_eq!(
            paths.advertisement("ad-1"),
            PathBuf::from("/srv/classifieds/advertisements/ad-1.json")
        );
        assert_eq!(
            paths.favorite("fav-1"),
            PathBuf::from("/srv/classifieds/favorites/fav-1.json")
        );
    }

    #[test]
    fn default_root_is_local_data_dir() {
        assert_eq!(StoragePaths::default().root(), Path::new(DEFAULT_DATA_DIR));
    }
}
