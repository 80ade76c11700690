//! Department scope module
//!
//! Restricts department-tagged resources to principals assigned to the same
//! department, with a superuser bypass.
//!
//! # Examples
//!
//! ```
//! use roster_authz::principal::Principal;
//! use roster_authz::role::Role;
//! use roster_authz::scope::{department_allowed, Department};
//!
//! let principal = Principal::new("user:ines", Role::Admin).with_department(Department::Hr);
//!
//! assert!(department_allowed(&principal, Some(Department::Hr)));
//! assert!(!department_allowed(&principal, Some(Department::Finance)));
//! assert!(department_allowed(&principal, None));
//! ```

mod filter;
mod types;

#[cfg(test)]
mod tests;

pub use filter::department_allowed;
pub use types::Department;
