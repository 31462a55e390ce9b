// crates/flowauth-core/tests/mapping_validation_unit.rs
// ============================================================================
// Module: Mapping Validation Unit Tests
// Description: Tests for provider role mappings and coverage validation.
// Purpose: Pin the missing-roles report format and default conventions.
// ============================================================================

//! ## Overview
//! Coverage validation is the isolated fail-fast leaf consumed by the scope
//! and LDAP mappers. These tests exercise it apart from the adapters and pin
//! the scope-side report format: wording, alphabetical ordering, comma+space
//! separator, trailing period.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use flowauth_core::MappingError;
use flowauth_core::ProviderRoleMapping;
use flowauth_core::SecurityRole;
use flowauth_core::mapping::unmapped_roles_report;
use flowauth_core::validate_coverage;

// ============================================================================
// SECTION: Default Convention
// ============================================================================

/// An empty mapping synthesizes the `dataflow.<role>` convention for the
/// whole catalog.
#[test]
fn empty_mapping_synthesizes_default_convention() {
    let mapping = ProviderRoleMapping::new(true);
    let resolved = mapping.role_map().unwrap();

    assert_eq!(resolved.len(), 7);
    assert_eq!(resolved.get(&SecurityRole::Manage).map(String::as_str), Some("dataflow.manage"));
    assert_eq!(resolved.get(&SecurityRole::View).map(String::as_str), Some("dataflow.view"));
}

/// A custom scope prefix flows into the synthesized convention.
#[test]
fn custom_scope_prefix_flows_into_defaults() {
    let mapping = ProviderRoleMapping {
        oauth_scope_prefix: "platform.".to_string(),
        ..ProviderRoleMapping::new(true)
    };
    let resolved = mapping.role_map().unwrap();
    assert_eq!(resolved.get(&SecurityRole::Create).map(String::as_str), Some("platform.create"));
}

// ============================================================================
// SECTION: Coverage Failures
// ============================================================================

/// Mapping a single role leaves six uncovered; the report is pinned.
#[test]
fn single_entry_mapping_reports_six_missing_roles() {
    let mapping =
        ProviderRoleMapping::new(true).add_role_mapping("ROLE_MANAGE", "foo-scope-in-oauth");

    let err = mapping.role_map().unwrap_err();
    assert_eq!(
        err,
        MappingError::Configuration(
            "The following 6 roles are not mapped: CREATE, DEPLOY, DESTROY, MODIFY, SCHEDULE, VIEW."
                .to_string()
        )
    );
}

/// A single missing role uses the singular wording.
#[test]
fn one_missing_role_uses_singular_wording() {
    let mut mapping = ProviderRoleMapping::new(true);
    for role in SecurityRole::ALL {
        if role != SecurityRole::View {
            mapping = mapping.add_role_mapping(role.authority_name(), "some-scope");
        }
    }

    let err = mapping.role_map().unwrap_err();
    assert_eq!(
        err,
        MappingError::Configuration("The following 1 role is not mapped: VIEW.".to_string())
    );
}

/// Group mappings validate with the same coverage rules.
#[test]
fn group_mappings_validate_coverage_too() {
    let mapping = ProviderRoleMapping {
        group_mappings: BTreeMap::from([(
            "ROLE_VIEW".to_string(),
            "viewers".to_string(),
        )]),
        ..ProviderRoleMapping::new(true)
    };

    let err = mapping.group_map().unwrap_err();
    let MappingError::Configuration(message) = err else {
        panic!("expected configuration error");
    };
    assert!(message.starts_with("The following 6 roles are not mapped: "), "{message}");
}

/// An empty role prefix makes bare keys the configuration keys.
#[test]
fn empty_role_prefix_uses_bare_keys() {
    let mut mapping = ProviderRoleMapping {
        role_prefix: String::new(),
        ..ProviderRoleMapping::new(true)
    };
    for role in SecurityRole::ALL {
        mapping = mapping.add_role_mapping(role.key(), role.default_scope());
    }
    assert_eq!(mapping.role_map().unwrap().len(), 7);
}

// ============================================================================
// SECTION: Isolated Validator
// ============================================================================

/// The validator returns the missing subset in required order.
#[test]
fn validator_returns_sorted_missing_roles() {
    let mapped = BTreeMap::from([
        (SecurityRole::Manage, "m".to_string()),
        (SecurityRole::Schedule, "s".to_string()),
    ]);

    let missing = validate_coverage(&SecurityRole::ALL, &mapped).unwrap_err();
    assert_eq!(
        missing,
        vec![
            SecurityRole::Create,
            SecurityRole::Deploy,
            SecurityRole::Destroy,
            SecurityRole::Modify,
            SecurityRole::View,
        ]
    );
}

/// A complete mapping validates cleanly.
#[test]
fn validator_accepts_complete_mapping() {
    let mapped: BTreeMap<SecurityRole, String> = SecurityRole::ALL
        .iter()
        .map(|role| (*role, role.default_scope().to_string()))
        .collect();
    assert!(validate_coverage(&SecurityRole::ALL, &mapped).is_ok());
}

/// The report helper formats bare names with comma+space and a period.
#[test]
fn report_formats_names_with_comma_space_and_period() {
    let report = unmapped_roles_report(&[SecurityRole::Create, SecurityRole::View]);
    assert_eq!(report, "The following 2 roles are not mapped: CREATE, VIEW.");
    let report = unmapped_roles_report(&[SecurityRole::Deploy]);
    assert_eq!(report, "The following 1 role is not mapped: DEPLOY.");
}

// ============================================================================
// SECTION: Configuration Deserialization
// ============================================================================

/// Provider mappings deserialize from plain configuration data with the
/// documented defaults.
#[test]
fn provider_mapping_deserializes_with_defaults() {
    let mapping: ProviderRoleMapping = serde_json::from_str(
        r#"{
            "map_oauth_scopes": true,
            "role_mappings": { "ROLE_VIEW": "custom.view" }
        }"#,
    )
    .unwrap();

    assert!(mapping.map_oauth_scopes);
    assert!(!mapping.map_group_claims);
    assert_eq!(mapping.oauth_scope_prefix, "dataflow.");
    assert_eq!(mapping.role_prefix, "ROLE_");
    assert_eq!(mapping.group_claim, "roles");
    assert_eq!(mapping.principal_claim_name, None);
    assert_eq!(mapping.role_mappings.get("ROLE_VIEW").map(String::as_str), Some("custom.view"));
}
