//! Department scope filtering
//!
//! Exact-match comparison between a resource's department tag and the
//! principal's department. There is no hierarchy between departments and
//! no partial matching.

use super::types::Department;
use crate::principal::Principal;

/// Whether `principal` may see a resource tagged with `resource_department`
///
/// - untagged resources are visible to everyone
/// - superusers see every department
/// - a principal without a department fails every tagged resource
pub fn department_allowed(principal: &Principal, resource_department: Option<Department>) -> bool {
    let Some(required) = resource_department else {
        return true;
    };

    if principal.role().is_superuser() {
        return true;
    }

    principal.department() == Some(required)
}
