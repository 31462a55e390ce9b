// crates/flowauth-core/src/ldap.rs
// ============================================================================
// Module: LDAP Reverse Mapper
// Description: Resolves directory granted-authority names into roles.
// Purpose: Match LDAP group names to internal roles, case- and prefix-blind.
// Dependencies: crate::mapping, crate::roles
// ============================================================================

//! ## Overview
//! Directory integrations grant authorities shaped `[ROLE_|role_]<name>`.
//! This mapper compares them against a configured role-to-group mapping
//! after normalizing both sides: one leading `role_` prefix is stripped
//! case-insensitively and the remainder is case-folded. The same
//! normalization runs on the configured value and on every input, which
//! keeps the comparison symmetric by construction.
//!
//! Only the directory-relevant subset of the catalog participates here:
//! Create, Manage, and View. The missing-roles report for this component is
//! comma-separated with no space; it is contract-tested separately from the
//! scope mapper's format and must not be unified with it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::authority::Authority;
use crate::error::MappingError;
use crate::mapping::validate_coverage;
use crate::roles::SecurityRole;

// ============================================================================
// SECTION: LDAP Mapper
// ============================================================================

/// Catalog subset resolvable from directory authorities, alphabetical by key.
pub const LDAP_ROLES: [SecurityRole; 3] =
    [SecurityRole::Create, SecurityRole::Manage, SecurityRole::View];

/// Maps LDAP granted-authority names to internal role authorities.
///
/// # Invariants
/// - The configured mapping covers exactly the [`LDAP_ROLES`] subset;
///   construction fails otherwise.
/// - Matching is case-insensitive and ignores one leading `role_` prefix on
///   both sides.
/// - Output is a set: several directory groups granting the same role
///   collapse to one authority.
#[derive(Debug, Clone)]
pub struct LdapAuthoritiesMapper {
    /// Role paired with the pre-normalized external group name.
    role_to_group: BTreeMap<SecurityRole, String>,
}

impl LdapAuthoritiesMapper {
    /// Creates a mapper from a role-to-group-name mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Configuration`] when the mapping is empty or
    /// does not cover every role in [`LDAP_ROLES`]; missing roles are listed
    /// alphabetically, comma-separated with no space.
    pub fn new(role_mappings: &BTreeMap<SecurityRole, String>) -> Result<Self, MappingError> {
        if role_mappings.is_empty() {
            return Err(MappingError::Configuration(
                "The role mappings must not be empty.".to_string(),
            ));
        }
        validate_coverage(&LDAP_ROLES, role_mappings).map_err(|missing| {
            let names: Vec<&str> = missing.iter().map(|role| role.key()).collect();
            MappingError::Configuration(format!(
                "The following roles are not mapped: {}",
                names.join(",")
            ))
        })?;
        Ok(Self {
            role_to_group: role_mappings
                .iter()
                .map(|(role, group)| (*role, normalize(group)))
                .collect(),
        })
    }

    /// Resolves the internal roles granted by a collection of directory
    /// authority names.
    pub fn map_authorities<I, S>(&self, authorities: I) -> BTreeSet<Authority>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: BTreeSet<String> =
            authorities.into_iter().map(|name| normalize(name.as_ref())).collect();

        self.role_to_group
            .iter()
            .filter(|(_, group)| normalized.contains(*group))
            .map(|(role, _)| role.authority())
            .collect()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Strips one leading `role_` prefix case-insensitively, then case-folds.
fn normalize(name: &str) -> String {
    let prefix = SecurityRole::AUTHORITY_PREFIX;
    let bare = name
        .get(.. prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .and_then(|_| name.get(prefix.len() ..))
        .unwrap_or(name);
    bare.to_ascii_lowercase()
}
