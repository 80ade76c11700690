//! Role type definitions
//!
//! Roles form a fixed total order. The position of every role is spelled
//! out in [`Role::rank`]; comparisons go through that table and never
//! through the declaration order of the enum.

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Privilege level of a principal, lowest to highest:
/// `viewer < restricted_admin < admin < lead_admin < manager < power_manager < superuser`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access to ungated surfaces
    Viewer,
    /// Administrative access limited to create/update
    RestrictedAdmin,
    /// Standard administrator
    Admin,
    /// Administrator leading a team of admins
    LeadAdmin,
    /// Department manager
    Manager,
    /// Manager with cross-cutting duties
    PowerManager,
    /// Bypasses every check
    Superuser,
}

impl Role {
    /// Every role, lowest rank first
    pub const ALL: [Role; 7] = [
        Role::Viewer,
        Role::RestrictedAdmin,
        Role::Admin,
        Role::LeadAdmin,
        Role::Manager,
        Role::PowerManager,
        Role::Superuser,
    ];

    /// Position of this role in the total order (0 = lowest)
    ///
    /// A new role must be given an explicit slot here.
    pub const fn rank(self) -> u8 {
        match self {
            Role::Viewer => 0,
            Role::RestrictedAdmin => 1,
            Role::Admin => 2,
            Role::LeadAdmin => 3,
            Role::Manager => 4,
            Role::PowerManager => 5,
            Role::Superuser => 6,
        }
    }

    /// Wire name of the role
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::RestrictedAdmin => "restricted_admin",
            Role::Admin => "admin",
            Role::LeadAdmin => "lead_admin",
            Role::Manager => "manager",
            Role::PowerManager => "power_manager",
            Role::Superuser => "superuser",
        }
    }

    /// Whether this role ranks at or above `threshold`
    pub const fn rank_at_least(self, threshold: Role) -> bool {
        self.rank() >= threshold.rank()
    }

    pub const fn is_superuser(self) -> bool {
        matches!(self, Role::Superuser)
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table_is_strictly_increasing() {
        for pair in Role::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{} !< {}", pair[0], pair[1]);
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("lead_admin".parse::<Role>().unwrap(), Role::LeadAdmin);
        assert_eq!("superuser".parse::<Role>().unwrap(), Role::Superuser);
        assert!(matches!(
            "LeadAdmin".parse::<Role>(),
            Err(AuthzError::UnknownRole(_))
        ));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::PowerManager).unwrap();
        assert_eq!(json, "\"power_manager\"");

        let role: Role = serde_json::from_str("\"restricted_admin\"").unwrap();
        assert_eq!(role, Role::RestrictedAdmin);

        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
