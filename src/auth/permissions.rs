// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-action access policy for the advertisement endpoints.
//!
//! | Action                            | Who                         |
//! |-----------------------------------|-----------------------------|
//! | list, retrieve                    | anyone                      |
//! | create, add/list favorites        | any authenticated user      |
//! | update, partial update, destroy   | creator, staff or superuser |

use super::{AuthError, AuthenticatedUser};
use crate::storage::{Advertisement, OwnershipEnforcer};

/// Operations exposed on the advertisement resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
    AddFavorite,
    ListFavorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    Authenticated,
    /// Authenticated and either the creator or staff.
    OwnerOrStaff,
}

impl Action {
    pub fn access(self) -> Access {
        match self {
            Action::List | Action::Retrieve => Access::Anyone,
            Action::Create | Action::AddFavorite | Action::ListFavorites => Access::Authenticated,
            Action::Update | Action::PartialUpdate | Action::Destroy => Access::OwnerOrStaff,
        }
    }
}

/// Decide whether `requester` may perform `action`.
///
/// Owner checks need the target; calling with `target = None` for an
/// owner-scoped action only checks authentication. Handlers call again
/// once the advertisement has been loaded.
pub fn authorize(
    action: Action,
    requester: Option<&AuthenticatedUser>,
    target: Option<&Advertisement>,
) -> Result<(), AuthError> {
    match action.access() {
        Access::Anyone => Ok(()),
        Access::Authenticated => requester.map(|_| ()).ok_or(AuthError::MissingAuthHeader),
        Access::OwnerOrStaff => {
            let user = requester.ok_or(AuthError::MissingAuthHeader)?;
            let Some(ad) = target else {
                return Ok(());
            };
            ad.verify_owner_or_staff(user).map_err(|e| {
                tracing::warn!(error = %e, ?action, "Permission denied");
                AuthError::InsufficientPermissions
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::storage::AdvertisementStatus;
    use chrono::Utc;

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            role,
            session_id: None,
            issuer: "test".to_string(),
            expires_at: 0,
        }
    }

    fn ad_by(creator: &str) -> Advertisement {
        let now = Utc::now();
        Advertisement {
            id: "7b0c7c4e-1f57-4c3b-9d0b-0b7f2f0d6a11".to_string(),
            title: "Bike".to_string(),
            description: String::new(),
            creator: creator.to_string(),
            status: AdvertisementStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn anyone_may_list_and_retrieve() {
        assert!(authorize(Action::List, None, None).is_ok());
        assert!(authorize(Action::Retrieve, None, Some(&ad_by("alice"))).is_ok());
    }

    #[test]
    fn create_and_favorites_require_authentication() {
        for action in [Action::Create, Action::AddFavorite, Action::ListFavorites] {
            assert!(matches!(
                authorize(action, None, None),
                Err(AuthError::MissingAuthHeader)
            ));
            assert!(authorize(action, Some(&user("bob", Role::User)), None).is_ok());
        }
    }

    #[test]
    fn owner_may_modify() {
        let ad = ad_by("alice");
        let alice = user("alice", Role::User);
        for action in [Action::Update, Action::PartialUpdate, Action::Destroy] {
            assert!(authorize(action, Some(&alice), Some(&ad)).is_ok());
        }
    }

    #[test]
    fn other_user_is_forbidden() {
        let ad = ad_by("alice");
        let bob = user("bob", Role::User);
        let err = authorize(Action::Destroy, Some(&bob), Some(&ad)).unwrap_err();
        assert!(matches!(err, AuthError::InsufficientPermissions));
    }

    #[test]
    fn staff_and_superuser_bypass_ownership() {
        let ad = ad_by("alice");
        assert!(authorize(Action::Update, Some(&user("mod", Role::Staff)), Some(&ad)).is_ok());
        assert!(authorize(Action::Destroy, Some(&user("root", Role::Superuser)), Some(&ad)).is_ok());
    }

    #[test]
    fn owner_actions_without_requester_are_unauthenticated() {
        let err = authorize(Action::Update, None, Some(&ad_by("alice"))).unwrap_err();
        assert!(matches!(err, AuthError::MissingAuthHeader));
    }
}
