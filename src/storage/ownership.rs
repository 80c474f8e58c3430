// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for mutating storage operations.
//!
//! A resource may be modified by its owner, or by any staff or superuser
//! identity.

use crate::auth::AuthenticatedUser;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;

    /// Short resource label used in permission errors.
    fn resource_label(&self) -> String;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Whether `user` owns the resource or holds a staff role.
    fn is_owner_or_staff(&self, user: &AuthenticatedUser) -> bool;

    /// Verify that the user may modify this resource.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` if the user is neither the
    /// owner nor staff.
    fn verify_owner_or_staff(&self, user: &AuthenticatedUser) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn is_owner_or_staff(&self, user: &AuthenticatedUser) -> bool {
        user.is_staff() || self.owner_user_id() == user.user_id
    }

    fn verify_owner_or_staff(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if self.is_owner_or_staff(user) {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: user.user_id.clone(),
                resource: self.resource_label(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    struct TestResource {
        owner: String,
    }

    impl OwnedResource for TestResource {
        fn owner_user_id(&self) -> &str {
            &self.owner
        }

        fn resource_label(&self) -> String {
            "test resource".to_string()
        }
    }

    fn make_user(user_id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id.to_string(),
            role,
            session_id: None,
            issuer: "test".to_string(),
            expires_at: 0,
        }
    }

    fn resource() -> TestResource {
        TestResource {
            owner: "user_123".to_string(),
        }
    }

    #[test]
    fn owner_passes() {
        let user = make_user("user_123", Role::User);
        assert!(resource().verify_owner_or_staff(&user).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let user = make_user("user_456", Role::User);

        let result = resource().verify_owner_or_staff(&user);
        match result {
            Err(StorageError::PermissionDenied { user_id, resource }) => {
                assert_eq!(user_id, "user_456");
                assert_eq!(resource, "test resource");
            }
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
    }

    #[test]
    fn staff_and_superuser_bypass_ownership() {
        for role in [Role::Staff, Role::Superuser] {
            let user = make_user("moderator", role);
            assert!(resource().is_owner_or_staff(&user));
            assert!(resource().verify_owner_or_staff(&user).is_ok());
        }
    }
}
