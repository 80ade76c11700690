//! Test suite for department scoping
//!
//! Tests cover:
//! - Untagged resources
//! - Exact matching
//! - Missing principal department
//! - Superuser bypass
//! - Parsing and serde names
//! - Concurrent access

use super::*;
use crate::error::AuthzError;
use crate::principal::Principal;
use crate::role::Role;
use std::sync::Arc;
use std::thread;

fn member(role: Role, department: Department) -> Principal {
    Principal::new("user:member", role).with_department(department)
}

// ============================================================================
// Matching Tests
// ============================================================================

#[test]
fn test_untagged_resource_visible_to_all() {
    let unassigned = Principal::new("user:new-hire", Role::Viewer);
    assert!(department_allowed(&unassigned, None));

    for dept in Department::ALL {
        assert!(department_allowed(&member(Role::Viewer, dept), None));
    }
}

#[test]
fn test_exact_department_match() {
    let finance = member(Role::Admin, Department::Finance);
    assert!(department_allowed(&finance, Some(Department::Finance)));
}

#[test]
fn test_department_mismatch() {
    let hr = member(Role::PowerManager, Department::Hr);
    assert!(!department_allowed(&hr, Some(Department::Finance)));
}

#[test]
fn test_only_matching_department_passes() {
    for held in Department::ALL {
        let principal = member(Role::Manager, held);
        for required in Department::ALL {
            assert_eq!(department_allowed(&principal, Some(required)), held == required);
        }
    }
}

#[test]
fn test_unassigned_principal_fails_closed() {
    let unassigned = Principal::new("user:new-hire", Role::PowerManager);
    for dept in Department::ALL {
        assert!(!department_allowed(&unassigned, Some(dept)));
    }
}

// ============================================================================
// Superuser Tests
// ============================================================================

#[test]
fn test_superuser_bypasses_department() {
    let root = member(Role::Superuser, Department::Hr);
    assert!(department_allowed(&root, Some(Department::Finance)));

    let unassigned_root = Principal::new("user:root", Role::Superuser);
    assert!(department_allowed(&unassigned_root, Some(Department::Legal)));
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_department_parsing() {
    assert_eq!("customer_support".parse::<Department>().unwrap(), Department::CustomerSupport);
    assert_eq!("it".parse::<Department>().unwrap(), Department::It);

    // Case-sensitive, no aliases
    assert!(matches!(
        "Finance".parse::<Department>(),
        Err(AuthzError::UnknownDepartment(_))
    ));
    assert!("customer-support".parse::<Department>().is_err());
}

#[test]
fn test_department_serde_names() {
    for dept in Department::ALL {
        let json = serde_json::to_string(&dept).unwrap();
        assert_eq!(json, format!("\"{}\"", dept.as_str()));
        let back: Department = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dept);
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_department_checks() {
    let principal = Arc::new(member(Role::Admin, Department::Sales));
    let mut handles = vec![];

    for i in 0..8 {
        let principal = Arc::clone(&principal);
        handles.push(thread::spawn(move || {
            for _ in 0..1_000 {
                let dept = Department::ALL[i % Department::ALL.len()];
                assert_eq!(
                    department_allowed(&principal, Some(dept)),
                    dept == Department::Sales
                );
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
