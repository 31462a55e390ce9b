// crates/flowauth-core/src/mapping.rs
// ============================================================================
// Module: Provider Role Mapping
// Description: Per-provider role mapping configuration and coverage checks.
// Purpose: Resolve configured role-to-scope maps and fail fast on gaps.
// Dependencies: serde, crate::roles
// ============================================================================

//! ## Overview
//! A [`ProviderRoleMapping`] holds the authorization configuration for one
//! identity provider: whether token scopes are mapped at all, the explicit
//! role-to-scope mapping (if any), and an optional group-claim mapping.
//! Values arrive as plain constructor/struct data; loading them from files
//! or the environment is the surrounding system's concern.
//!
//! Coverage validation is deliberately isolated in [`validate_coverage`] so
//! the fail-fast behavior stays unit-testable apart from the adapters that
//! consume it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::MappingError;
use crate::roles::SecurityRole;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default prefix for externally-visible scope names.
pub const DEFAULT_SCOPE_PREFIX: &str = "dataflow.";

/// Default prefix applied to internal role keys in mapping configuration.
pub const DEFAULT_ROLE_PREFIX: &str = "ROLE_";

/// Default claim consulted for group memberships.
pub const DEFAULT_GROUP_CLAIM: &str = "roles";

// ============================================================================
// SECTION: Provider Role Mapping
// ============================================================================

/// Authorization configuration for a single identity provider.
///
/// # Invariants
/// - A non-empty `role_mappings` map must cover every catalog role; coverage
///   is checked when the map is resolved, and resolution fails fast.
/// - Keys in `role_mappings`/`group_mappings` are role names under
///   `role_prefix` (`ROLE_CREATE`, ...); values are external identifiers.
/// - Values may repeat: several roles mapping to one external identifier is
///   valid and collapses to one authority per role on match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderRoleMapping {
    /// Map token scopes to roles; when false, every catalog role is granted.
    pub map_oauth_scopes: bool,
    /// Map group claims to roles via `group_mappings`.
    pub map_group_claims: bool,
    /// Explicit role-name to scope-name mapping; empty means the default
    /// `dataflow.<role>` convention.
    pub role_mappings: BTreeMap<String, String>,
    /// Explicit role-name to group-name mapping for the group-claim path.
    pub group_mappings: BTreeMap<String, String>,
    /// Prefix used when synthesizing default scope names.
    pub oauth_scope_prefix: String,
    /// Prefix under which role keys appear in the mapping configuration and
    /// in produced authorities.
    pub role_prefix: String,
    /// Claim name carrying group memberships.
    pub group_claim: String,
    /// Optional override for the claim identifying the principal.
    pub principal_claim_name: Option<String>,
}

impl Default for ProviderRoleMapping {
    fn default() -> Self {
        Self {
            map_oauth_scopes: false,
            map_group_claims: false,
            role_mappings: BTreeMap::new(),
            group_mappings: BTreeMap::new(),
            oauth_scope_prefix: DEFAULT_SCOPE_PREFIX.to_string(),
            role_prefix: DEFAULT_ROLE_PREFIX.to_string(),
            group_claim: DEFAULT_GROUP_CLAIM.to_string(),
            principal_claim_name: None,
        }
    }
}

impl ProviderRoleMapping {
    /// Creates a mapping with the given scope-mapping flag and no explicit
    /// role mappings (default convention applies).
    #[must_use]
    pub fn new(map_oauth_scopes: bool) -> Self {
        Self {
            map_oauth_scopes,
            ..Self::default()
        }
    }

    /// Creates a mapping with an explicit role-to-scope map.
    #[must_use]
    pub fn with_role_mappings(
        map_oauth_scopes: bool,
        role_mappings: BTreeMap<String, String>,
    ) -> Self {
        Self {
            map_oauth_scopes,
            role_mappings,
            ..Self::default()
        }
    }

    /// Adds a single role-to-scope mapping entry (builder style).
    #[must_use]
    pub fn add_role_mapping(mut self, role_name: &str, external_name: &str) -> Self {
        self.role_mappings.insert(role_name.to_string(), external_name.to_string());
        self
    }

    /// Resolves the configured role mappings against the catalog.
    ///
    /// An empty map synthesizes the default convention
    /// (`<oauth_scope_prefix><lowercase key>`); a non-empty map must cover
    /// every catalog role.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Configuration`] with the pinned missing-roles
    /// report when a non-empty map leaves catalog roles uncovered.
    pub fn role_map(&self) -> Result<BTreeMap<SecurityRole, String>, MappingError> {
        self.resolve_catalog(&self.role_mappings)
    }

    /// Resolves the configured group mappings against the catalog, with the
    /// same default-convention and coverage rules as [`Self::role_map`].
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Configuration`] with the pinned missing-roles
    /// report when a non-empty map leaves catalog roles uncovered.
    pub fn group_map(&self) -> Result<BTreeMap<SecurityRole, String>, MappingError> {
        self.resolve_catalog(&self.group_mappings)
    }

    /// Returns the configuration key a catalog role appears under.
    fn config_key(&self, role: SecurityRole) -> String {
        if self.role_prefix.is_empty() || role.key().starts_with(&self.role_prefix) {
            role.key().to_string()
        } else {
            format!("{}{}", self.role_prefix, role.key())
        }
    }

    fn resolve_catalog(
        &self,
        mappings: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<SecurityRole, String>, MappingError> {
        if mappings.is_empty() {
            return Ok(SecurityRole::ALL
                .iter()
                .map(|role| {
                    let scope =
                        format!("{}{}", self.oauth_scope_prefix, role.key().to_ascii_lowercase());
                    (*role, scope)
                })
                .collect());
        }

        let mut resolved = BTreeMap::new();
        let mut missing = Vec::new();
        for role in SecurityRole::ALL {
            match mappings.get(&self.config_key(role)) {
                Some(external) => {
                    resolved.insert(role, external.clone());
                }
                None => missing.push(role),
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(MappingError::Configuration(unmapped_roles_report(&missing)))
        }
    }
}

// ============================================================================
// SECTION: Coverage Validation
// ============================================================================

/// Checks that `mapping` covers every role in `required`.
///
/// Missing roles are reported in the order of `required`; callers pass
/// catalog slices that are already alphabetically sorted by bare key.
///
/// # Errors
///
/// Returns the sorted list of missing roles.
pub fn validate_coverage(
    required: &[SecurityRole],
    mapping: &BTreeMap<SecurityRole, String>,
) -> Result<(), Vec<SecurityRole>> {
    let missing: Vec<SecurityRole> =
        required.iter().copied().filter(|role| !mapping.contains_key(role)).collect();
    if missing.is_empty() { Ok(()) } else { Err(missing) }
}

/// Formats the scope-mapper missing-roles report.
///
/// The wording, capitalization, alphabetical ordering, comma+space separator,
/// and trailing period are a pinned contract.
#[must_use]
pub fn unmapped_roles_report(missing: &[SecurityRole]) -> String {
    let names: Vec<&str> = missing.iter().map(|role| role.key()).collect();
    format!(
        "The following {} {} not mapped: {}.",
        missing.len(),
        if missing.len() > 1 { "roles are" } else { "role is" },
        names.join(", ")
    )
}
