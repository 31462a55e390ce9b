// crates/flowauth-core/src/scopes.rs
// ============================================================================
// Module: Static Scope Mapper
// Description: Resolves OAuth2 token scopes into granted authorities.
// Purpose: Map a principal's scope set to internal roles per provider config.
// Dependencies: crate::mapping, crate::roles
// ============================================================================

//! ## Overview
//! The scope mapper covers three construction modes. Full trust
//! (`map_oauth_scopes = false`) grants every catalog role regardless of the
//! supplied scopes. Default convention maps `ROLE_X` to `dataflow.x` and
//! intersects with the token's scopes. Explicit mappings are validated for
//! full catalog coverage at construction and then intersected the same way.
//!
//! One mapper can serve several identity providers; resolution selects the
//! provider by client id. All state is resolved and frozen at construction,
//! so concurrent resolution needs no synchronization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::authority::Authority;
use crate::error::MappingError;
use crate::mapping::ProviderRoleMapping;
use crate::roles::SecurityRole;

// ============================================================================
// SECTION: Scope Mapper
// ============================================================================

/// Per-provider state frozen at construction.
#[derive(Debug, Clone)]
struct ProviderScopeMap {
    /// When false, resolution grants all catalog roles unconditionally.
    map_oauth_scopes: bool,
    /// Prefix applied to role keys in produced authorities.
    role_prefix: String,
    /// Resolved role-to-expected-scope mapping.
    role_to_scope: BTreeMap<SecurityRole, String>,
}

/// Maps OAuth2 token scopes to granted authorities.
///
/// # Invariants
/// - Every configured provider mapping covers the full catalog (validated at
///   construction; incomplete mappings never produce a mapper).
/// - Resolution output is a set: several scopes mapping to one role, or one
///   scope covering several roles, never produce duplicate authorities.
#[derive(Debug, Clone)]
pub struct ScopeAuthoritiesMapper {
    providers: BTreeMap<String, ProviderScopeMap>,
    default_provider_id: String,
}

impl ScopeAuthoritiesMapper {
    /// Creates a mapper for several identity providers.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Configuration`] when any provider's role
    /// mapping leaves catalog roles uncovered.
    pub fn new(
        provider_mappings: BTreeMap<String, ProviderRoleMapping>,
        default_provider_id: impl Into<String>,
    ) -> Result<Self, MappingError> {
        let mut providers = BTreeMap::new();
        for (provider_id, mapping) in provider_mappings {
            providers.insert(provider_id, ProviderScopeMap::resolve(&mapping)?);
        }
        Ok(Self {
            providers,
            default_provider_id: default_provider_id.into(),
        })
    }

    /// Creates a mapper for a single provider.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidArgument`] when `provider_id` is empty
    /// and [`MappingError::Configuration`] when the mapping is incomplete.
    pub fn single(
        provider_id: &str,
        mapping: ProviderRoleMapping,
    ) -> Result<Self, MappingError> {
        if provider_id.is_empty() {
            return Err(MappingError::InvalidArgument(
                "The provider id must not be empty.".to_string(),
            ));
        }
        let mut providers = BTreeMap::new();
        providers.insert(provider_id.to_string(), ProviderScopeMap::resolve(&mapping)?);
        Ok(Self {
            providers,
            default_provider_id: provider_id.to_string(),
        })
    }

    /// Creates a single-provider mapper from the scope-mapping flag alone.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidArgument`] when `provider_id` is empty.
    pub fn from_flag(provider_id: &str, map_oauth_scopes: bool) -> Result<Self, MappingError> {
        Self::single(provider_id, ProviderRoleMapping::new(map_oauth_scopes))
    }

    /// Resolves the authorities granted by `scopes` for the provider
    /// registered under `client_id`.
    ///
    /// Empty scopes yield an empty result in scope-mapping mode and the full
    /// catalog in full-trust mode; neither case is an error.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidArgument`] when `client_id` is empty or
    /// no provider mapping is registered under it.
    pub fn map_scopes(
        &self,
        client_id: &str,
        scopes: &BTreeSet<String>,
    ) -> Result<BTreeSet<Authority>, MappingError> {
        if client_id.is_empty() {
            return Err(MappingError::InvalidArgument(
                "The clientId argument must not be empty.".to_string(),
            ));
        }
        let provider = self.providers.get(client_id).ok_or_else(|| {
            MappingError::InvalidArgument(format!(
                "No role mapping found for clientId {client_id}"
            ))
        })?;
        Ok(provider.grant(scopes))
    }

    /// Resolves authorities against the default provider.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidArgument`] when the default provider id
    /// is empty or unregistered.
    pub fn map_default_scopes(
        &self,
        scopes: &BTreeSet<String>,
    ) -> Result<BTreeSet<Authority>, MappingError> {
        self.map_scopes(&self.default_provider_id, scopes)
    }
}

impl ProviderScopeMap {
    /// Resolves and freezes one provider's configuration, failing fast on
    /// incomplete mappings.
    fn resolve(mapping: &ProviderRoleMapping) -> Result<Self, MappingError> {
        Ok(Self {
            map_oauth_scopes: mapping.map_oauth_scopes,
            role_prefix: mapping.role_prefix.clone(),
            role_to_scope: mapping.role_map()?,
        })
    }

    /// Computes the granted authority set for one scope set.
    fn grant(&self, scopes: &BTreeSet<String>) -> BTreeSet<Authority> {
        if !self.map_oauth_scopes {
            return self
                .role_to_scope
                .keys()
                .map(|role| self.role_authority(*role))
                .collect();
        }

        let mut granted = BTreeSet::new();
        for (role, expected_scope) in &self.role_to_scope {
            if scopes.iter().any(|scope| scope.eq_ignore_ascii_case(expected_scope)) {
                granted.insert(self.role_authority(*role));
            }
        }
        granted
    }

    fn role_authority(&self, role: SecurityRole) -> Authority {
        Authority::new(format!("{}{}", self.role_prefix, role.key()))
    }
}
