//! User roles.

use serde::{Deserialize, Serialize};

/// Role attached to a user record in the document store.
///
/// Only [`UserRole::Owner`] may configure the company profile and is subject
/// to the setup-completion gate; other roles operate the till but are never
/// redirected into the setup wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Tenant owner: full access including company setup.
    Owner,
    /// Store manager: catalog and customer management.
    Manager,
    /// Cashier: sales screen only.
    Cashier,
}

impl UserRole {
    /// Whether this role owns the tenant's company profile.
    #[must_use]
    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Manager => write!(f, "manager"),
            Self::Cashier => write!(f, "cashier"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for role in [UserRole::Owner, UserRole::Manager, UserRole::Cashier] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn only_owner_is_owner() {
        assert!(UserRole::Owner.is_owner());
        assert!(!UserRole::Manager.is_owner());
        assert!(!UserRole::Cashier.is_owner());
    }
}
