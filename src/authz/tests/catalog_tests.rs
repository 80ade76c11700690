//! Descriptor catalog integration tests
//!
//! Tests JSON loading, legacy availability tags, permission gates,
//! validation failures, and navigation filtering over a loaded catalog.

use roster_authz::{
    visible_groups, AuthzError, Capability, CapabilityRef, DecisionReason, Department,
    DescriptorCatalog, Permission, Principal, Role,
};
use roster_authz::gate::{Action, Module};
use std::io::Write;

const CATALOG: &str = r#"{
  "resources": [
    { "id": "dashboard", "label": "Dashboard", "group": "General", "path": "/", "availableTo": "all" },
    { "id": "clients", "label": "Clients", "group": "Sales", "path": "/clients",
      "requiredCapability": "canViewClients" },
    { "id": "payroll", "label": "Payroll", "group": "Finance", "path": "/payroll",
      "minimumRole": "manager", "requiredCapability": "canManageFinancials", "department": "finance" },
    { "id": "budgets", "label": "Budgets", "group": "Finance", "path": "/budgets",
      "availableTo": "POWER" },
    { "id": "forecasts", "label": "Forecasts", "group": "Finance", "path": "/forecasts",
      "requiredCapability": "canApproveForecasts" },
    { "id": "hr.delete", "label": "Delete HR record",
      "gate": { "module": "hr", "action": "delete" }, "department": "hr" },
    { "id": "marketing.view", "permission": { "module": "marketing", "action": "view" } }
  ]
}"#;

fn catalog() -> DescriptorCatalog {
    DescriptorCatalog::from_json_str(CATALOG).unwrap()
}

#[test]
fn test_load_preserves_declaration_order() {
    let catalog = catalog();
    let ids: Vec<_> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["dashboard", "clients", "payroll", "budgets", "forecasts", "hr.delete", "marketing.view"]
    );
}

#[test]
fn test_label_defaults_to_id() {
    let catalog = catalog();
    assert_eq!(catalog.get("marketing.view").unwrap().label, "marketing.view");
}

#[test]
fn test_available_to_maps_to_role_floor() {
    let catalog = catalog();
    assert_eq!(catalog.get("dashboard").unwrap().descriptor.minimum_role(), None);
    assert_eq!(
        catalog.get("budgets").unwrap().descriptor.minimum_role(),
        Some(Role::PowerManager)
    );
}

#[test]
fn test_gate_entry_applies_matrix_and_overrides() {
    let catalog = catalog();
    let descriptor = &catalog.get("hr.delete").unwrap().descriptor;

    assert_eq!(descriptor.minimum_role(), Some(Role::Admin));
    assert_eq!(
        descriptor.required_capability(),
        Some(&CapabilityRef::Known(Capability::CanViewEvaluations))
    );
    assert_eq!(descriptor.required_department(), Some(Department::Hr));
    assert_eq!(descriptor.permission(), Some(Permission::new(Module::Hr, Action::Delete)));
}

#[test]
fn test_permission_tag_without_matrix() {
    let catalog = catalog();
    let descriptor = &catalog.get("marketing.view").unwrap().descriptor;
    assert!(descriptor.is_unconstrained());
    assert_eq!(
        descriptor.permission(),
        Some(Permission::new(Module::Marketing, Action::View))
    );
}

#[test]
fn test_unrecognized_capability_loads_and_denies() {
    let catalog = catalog();
    assert_eq!(
        catalog.unrecognized_capabilities(),
        vec![("forecasts", "canApproveForecasts")]
    );

    let principal = Principal::new("user:pm", Role::PowerManager)
        .with_capabilities(Capability::ALL.into_iter().collect());
    let decision = roster_authz::evaluate(&principal, &catalog.get("forecasts").unwrap().descriptor);
    assert_eq!(decision.reason(), DecisionReason::CapabilityMissing);
}

#[test]
fn test_navigation_for_finance_manager() {
    let catalog = catalog();
    let tree = catalog.navigation();
    let principal = Principal::new("user:fin", Role::Manager)
        .with_department(Department::Finance)
        .with_capability(Capability::CanManageFinancials, true);

    let visible = visible_groups(&principal, &tree);
    let rendered: Vec<(&str, Vec<&str>)> = visible
        .iter()
        .map(|g| (g.label, g.items.iter().map(|i| i.id.as_str()).collect()))
        .collect();

    // Sales is dropped entirely; budgets needs power_manager; forecasts never grants
    assert_eq!(
        rendered,
        vec![("General", vec!["dashboard"]), ("Finance", vec!["payroll"])]
    );
}

#[test]
fn test_entries_without_path_are_not_navigable() {
    let catalog = catalog();
    let tree = catalog.navigation();
    let ids: Vec<_> = tree
        .iter()
        .flat_map(|g| g.items.iter().map(|i| i.id.as_str()))
        .collect();
    assert!(!ids.contains(&"hr.delete"));
    assert!(!ids.contains(&"marketing.view"));
}

#[test]
fn test_conflicting_floor_declarations_rejected() {
    let json = r#"{ "resources": [
        { "id": "x", "availableTo": "admin", "minimumRole": "manager" }
    ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(json),
        Err(AuthzError::Catalog(_))
    ));
}

#[test]
fn test_gate_and_permission_together_rejected() {
    let json = r#"{ "resources": [
        { "id": "x",
          "gate": { "module": "hr", "action": "view" },
          "permission": { "module": "hr", "action": "view" } }
    ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(json),
        Err(AuthzError::Catalog(_))
    ));
}

#[test]
fn test_gate_floor_only_tightens() {
    let json = r#"{ "resources": [
        { "id": "open-tag", "gate": { "module": "hr", "action": "delete" }, "availableTo": "all" },
        { "id": "viewer-floor", "gate": { "module": "hr", "action": "delete" }, "minimumRole": "viewer" },
        { "id": "manager-floor", "gate": { "module": "hr", "action": "delete" }, "minimumRole": "manager" }
    ] }"#;
    let catalog = DescriptorCatalog::from_json_str(json).unwrap();
    let floor = |id: &str| catalog.get(id).unwrap().descriptor.minimum_role();

    assert_eq!(floor("open-tag"), Some(Role::Admin));
    assert_eq!(floor("viewer-floor"), Some(Role::Admin));
    assert_eq!(floor("manager-floor"), Some(Role::Manager));

    let viewer = Principal::new("user:viewer", Role::Viewer)
        .with_department(Department::Hr)
        .with_capability(Capability::CanViewEvaluations, true);
    let decision = roster_authz::evaluate(&viewer, &catalog.get("viewer-floor").unwrap().descriptor);
    assert_eq!(decision.reason(), DecisionReason::RoleTooLow);
}

#[test]
fn test_gate_capability_cannot_be_replaced() {
    let conflicting = r#"{ "resources": [
        { "id": "x", "gate": { "module": "finance", "action": "delete" },
          "requiredCapability": "canViewReports" }
    ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(conflicting),
        Err(AuthzError::Catalog(_))
    ));

    let restated = r#"{ "resources": [
        { "id": "x", "gate": { "module": "finance", "action": "delete" },
          "requiredCapability": "canManageFinancials" }
    ] }"#;
    let catalog = DescriptorCatalog::from_json_str(restated).unwrap();
    assert_eq!(
        catalog.get("x").unwrap().descriptor.required_capability(),
        Some(&CapabilityRef::Known(Capability::CanManageFinancials))
    );
}

#[test]
fn test_unknown_tag_and_names_rejected() {
    let bad_tag = r#"{ "resources": [ { "id": "x", "availableTo": "owners" } ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(bad_tag),
        Err(AuthzError::Catalog(_))
    ));

    let bad_role = r#"{ "resources": [ { "id": "x", "minimumRole": "owner" } ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(bad_role),
        Err(AuthzError::Json(_))
    ));

    let bad_department = r#"{ "resources": [ { "id": "x", "department": "research" } ] }"#;
    assert!(DescriptorCatalog::from_json_str(bad_department).is_err());

    let typo = r#"{ "resources": [ { "id": "x", "requiredCapabilty": "canViewClients" } ] }"#;
    assert!(DescriptorCatalog::from_json_str(typo).is_err());
}

#[test]
fn test_duplicate_ids_rejected() {
    let json = r#"{ "resources": [ { "id": "x" }, { "id": "x" } ] }"#;
    assert!(matches!(
        DescriptorCatalog::from_json_str(json),
        Err(AuthzError::Catalog(_))
    ));
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let catalog = DescriptorCatalog::from_path(file.path()).unwrap();
    assert_eq!(catalog.len(), 7);
}

#[test]
fn test_load_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = DescriptorCatalog::from_path(dir.path().join("missing.json"));
    assert!(matches!(result, Err(AuthzError::Io(_))));
}
