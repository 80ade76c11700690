//! Department type definitions
//!
//! Departments are a closed set. An unknown tag cannot be represented, so a
//! misspelled department is rejected when the principal or descriptor is
//! built rather than silently matching nothing.

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational unit a principal or resource belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Operations,
    Hr,
    Finance,
    Marketing,
    Sales,
    Product,
    It,
    CustomerSupport,
    Legal,
    Facilities,
    Engineering,
    Procurement,
}

impl Department {
    pub const ALL: [Department; 12] = [
        Department::Operations,
        Department::Hr,
        Department::Finance,
        Department::Marketing,
        Department::Sales,
        Department::Product,
        Department::It,
        Department::CustomerSupport,
        Department::Legal,
        Department::Facilities,
        Department::Engineering,
        Department::Procurement,
    ];

    /// Wire name of the department
    pub const fn as_str(self) -> &'static str {
        match self {
            Department::Operations => "operations",
            Department::Hr => "hr",
            Department::Finance => "finance",
            Department::Marketing => "marketing",
            Department::Sales => "sales",
            Department::Product => "product",
            Department::It => "it",
            Department::CustomerSupport => "customer_support",
            Department::Legal => "legal",
            Department::Facilities => "facilities",
            Department::Engineering => "engineering",
            Department::Procurement => "procurement",
        }
    }
}

impl FromStr for Department {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownDepartment(s.to_string()))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
