// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Superuser` - Full access, bypasses ownership checks
/// - `Staff` - Moderator, bypasses ownership checks on advertisements
/// - `User` - Regular user, may only modify their own advertisements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superuser,
    Staff,
    /// Least privilege for authenticated users.
    #[default]
    User,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Superuser, _) => true,
            (Role::Staff, Role::Staff | Role::User) => true,
            (Role::User, Role::User) => true,
            _ => false,
        }
    }

    /// Staff and superusers may modify any advertisement.
    pub fn is_staff(&self) -> bool {
        self.has_privilege(Role::Staff)
    }

    /// Parse role from a token claim (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "superuser" => Some(Role::Superuser),
            "staff" => Some(Role::Staff),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Superuser => write!(f, "superuser"),
            Role::Staff => write!(f, "staff"),
            Role::User => write!(f, "user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superuser_has_all_privileges() {
        assert!(Role::Superuser.has_privilege(Role::Superuser));
        assert!(Role::Superuser.has_privilege(Role::Staff));
        assert!(Role::Superuser.has_privilege(Role::User));
    }

    #[test]
    fn staff_is_below_superuser() {
        assert!(!Role::Staff.has_privilege(Role::Superuser));
        assert!(Role::Staff.has_privilege(Role::Staff));
        assert!(Role::Staff.has_privilege(Role::User));
    }

    #[test]
    fn user_only_has_user_privilege() {
        assert!(!Role::User.has_privilege(Role::Superuser));
        assert!(!Role::User.has_privilege(Role::Staff));
        assert!(Role::User.has_privilege(Role::User));
    }

    #[test]
    fn is_staff_covers_staff_and_superuser() {
        assert!(Role::Superuser.is_staff());
        assert!(Role::Staff.is_staff());
        assert!(!Role::User.is_staff());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("superuser"), Some(Role::Superuser));
        assert_eq!(Role::parse("STAFF"), Some(Role::Staff));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::default().to_string(), "user");
    }
}
