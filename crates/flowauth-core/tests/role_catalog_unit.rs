// crates/flowauth-core/tests/role_catalog_unit.rs
// ============================================================================
// Module: Role Catalog Unit Tests
// Description: Tests for the fixed role catalog and its derived names.
// Purpose: Pin catalog size, ordering, and name derivation.
// ============================================================================

//! ## Overview
//! The catalog is the shared leaf every mapping strategy derives from. These
//! tests pin its size, alphabetical ordering, and the derived authority and
//! default-scope names so adapters cannot drift.

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

use flowauth_core::SecurityRole;

// ============================================================================
// SECTION: Catalog Shape
// ============================================================================

/// The catalog has exactly seven members.
#[test]
fn catalog_has_seven_roles() {
    assert_eq!(SecurityRole::ALL.len(), 7);
}

/// `ALL` is alphabetically ordered by bare key.
#[test]
fn catalog_is_alphabetically_ordered() {
    let keys: Vec<&str> = SecurityRole::ALL.iter().map(|role| role.key()).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert_eq!(
        keys,
        vec!["CREATE", "DEPLOY", "DESTROY", "MANAGE", "MODIFY", "SCHEDULE", "VIEW"]
    );
}

// ============================================================================
// SECTION: Derived Names
// ============================================================================

/// Authority names are the bare key under the `ROLE_` prefix.
#[test]
fn authority_names_carry_role_prefix() {
    for role in SecurityRole::ALL {
        assert_eq!(role.authority_name(), format!("ROLE_{}", role.key()));
        assert_eq!(role.authority().as_str(), role.authority_name());
    }
}

/// Default scope names follow the `dataflow.<lowercase key>` convention.
#[test]
fn default_scopes_follow_convention() {
    for role in SecurityRole::ALL {
        assert_eq!(role.default_scope(), format!("dataflow.{}", role.key().to_lowercase()));
    }
    assert_eq!(SecurityRole::Manage.default_scope(), "dataflow.manage");
}

// ============================================================================
// SECTION: Key Lookup
// ============================================================================

/// Lookup accepts bare keys, prefixed keys, and mixed case.
#[test]
fn from_key_accepts_bare_and_prefixed() {
    assert_eq!(SecurityRole::from_key("VIEW"), Some(SecurityRole::View));
    assert_eq!(SecurityRole::from_key("ROLE_VIEW"), Some(SecurityRole::View));
    assert_eq!(SecurityRole::from_key("role_view"), Some(SecurityRole::View));
    assert_eq!(SecurityRole::from_key("Role_View"), Some(SecurityRole::View));
    assert_eq!(SecurityRole::from_key("view"), Some(SecurityRole::View));
    assert_eq!(SecurityRole::from_key("Schedule"), Some(SecurityRole::Schedule));
    assert_eq!(SecurityRole::from_key("ROLE_UNKNOWN"), None);
    assert_eq!(SecurityRole::from_key(""), None);
}

/// Parsing via `FromStr` mirrors `from_key` and reports unknown keys.
#[test]
fn from_str_mirrors_from_key() {
    assert_eq!("ROLE_DEPLOY".parse::<SecurityRole>(), Ok(SecurityRole::Deploy));
    assert!("operator".parse::<SecurityRole>().is_err());
}

/// Serde round-trips use the bare upper-case key.
#[test]
fn serde_uses_bare_upper_case_key() {
    let json = serde_json::to_string(&SecurityRole::Destroy).unwrap();
    assert_eq!(json, "\"DESTROY\"");
    let role: SecurityRole = serde_json::from_str("\"SCHEDULE\"").unwrap();
    assert_eq!(role, SecurityRole::Schedule);
}
