//! PIN login and role permissions.
//!
//! The PIN is a convenience gate for a shared till, not a security boundary.
//! Lookup is linear and PINs are stored in plain text.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{User, UserRole};

/// Screens a signed-in user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Permission {
    Dashboard,
    PointOfSale,
    Inventory,
    Expenses,
    Reports,
    ActivityLog,
    Settings,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::Dashboard,
        Permission::PointOfSale,
        Permission::Inventory,
        Permission::Expenses,
        Permission::Reports,
        Permission::ActivityLog,
        Permission::Settings,
    ];
}

impl UserRole {
    /// Admins can do everything. Employees only ring up sales.
    pub fn can(&self, permission: Permission) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Employee => permission == Permission::PointOfSale,
        }
    }
}

/// Finds the first user with this PIN.
pub fn authenticate<'a>(users: &'a [User], pin: &str) -> Option<&'a User> {
    users.iter().find(|u| u.pin == pin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_users;

    #[test]
    fn test_authenticate() {
        let users = default_users();
        assert_eq!(authenticate(&users, "1234").map(|u| u.id.as_str()), Some("u1"));
        assert_eq!(authenticate(&users, "0000").map(|u| u.id.as_str()), Some("u2"));
        assert!(authenticate(&users, "9999").is_none());
        assert!(authenticate(&users, "").is_none());
    }

    #[test]
    fn test_role_permissions() {
        for permission in Permission::ALL {
            assert!(UserRole::Admin.can(permission));
        }
        let employee: Vec<Permission> = Permission::ALL
            .into_iter()
            .filter(|p| UserRole::Employee.can(*p))
            .collect();
        assert_eq!(employee, vec![Permission::PointOfSale]);
    }
}
