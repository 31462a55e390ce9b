// crates/flowauth-core/src/roles.rs
// ============================================================================
// Module: Security Role Catalog
// Description: The fixed set of internal platform roles and their names.
// Purpose: Provide one shared role enumeration for every mapping strategy.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every mapping strategy in this crate resolves evidence against the same
//! seven-role catalog defined here. Adapters derive role names, authority
//! names, and default scope names from this enum instead of re-declaring
//! string literals, so the components cannot drift apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::authority::Authority;
use crate::error::MappingError;

// ============================================================================
// SECTION: Role Catalog
// ============================================================================

/// One of the fixed internal roles gating platform operations.
///
/// # Invariants
/// - The catalog has exactly seven members; [`SecurityRole::ALL`] lists them
///   in alphabetical order of the bare key.
/// - The bare key is stable and upper-case (`"CREATE"`, `"DEPLOY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityRole {
    /// Register new definitions on the platform.
    Create,
    /// Deploy streams and launch tasks.
    Deploy,
    /// Undeploy streams and destroy definitions.
    Destroy,
    /// Access management and boot endpoints.
    Manage,
    /// Modify existing definitions.
    Modify,
    /// Schedule task executions.
    Schedule,
    /// Read-only access to platform state.
    View,
}

impl SecurityRole {
    /// The full catalog, alphabetically ordered by bare key.
    pub const ALL: [Self; 7] = [
        Self::Create,
        Self::Deploy,
        Self::Destroy,
        Self::Manage,
        Self::Modify,
        Self::Schedule,
        Self::View,
    ];

    /// Prefix applied to the bare key to form the canonical authority name.
    pub const AUTHORITY_PREFIX: &'static str = "ROLE_";

    /// Returns the bare role key (no prefix).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Deploy => "DEPLOY",
            Self::Destroy => "DESTROY",
            Self::Manage => "MANAGE",
            Self::Modify => "MODIFY",
            Self::Schedule => "SCHEDULE",
            Self::View => "VIEW",
        }
    }

    /// Returns the canonical authority name (`ROLE_<KEY>`).
    #[must_use]
    pub const fn authority_name(self) -> &'static str {
        match self {
            Self::Create => "ROLE_CREATE",
            Self::Deploy => "ROLE_DEPLOY",
            Self::Destroy => "ROLE_DESTROY",
            Self::Manage => "ROLE_MANAGE",
            Self::Modify => "ROLE_MODIFY",
            Self::Schedule => "ROLE_SCHEDULE",
            Self::View => "ROLE_VIEW",
        }
    }

    /// Returns the canonical authority value for this role.
    #[must_use]
    pub fn authority(self) -> Authority {
        Authority::new(self.authority_name())
    }

    /// Returns the default external scope name (`dataflow.<key>`).
    #[must_use]
    pub const fn default_scope(self) -> &'static str {
        match self {
            Self::Create => "dataflow.create",
            Self::Deploy => "dataflow.deploy",
            Self::Destroy => "dataflow.destroy",
            Self::Manage => "dataflow.manage",
            Self::Modify => "dataflow.modify",
            Self::Schedule => "dataflow.schedule",
            Self::View => "dataflow.view",
        }
    }

    /// Looks up a role by bare or `ROLE_`-prefixed key, ignoring case in
    /// both the prefix and the key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let prefix = Self::AUTHORITY_PREFIX;
        let bare = key
            .get(.. prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .and_then(|_| key.get(prefix.len() ..))
            .unwrap_or(key);
        Self::ALL.iter().copied().find(|role| role.key().eq_ignore_ascii_case(bare))
    }
}

impl FromStr for SecurityRole {
    type Err = MappingError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::from_key(key)
            .ok_or_else(|| MappingError::InvalidArgument(format!("Unknown security role: {key}")))
    }
}

impl fmt::Display for SecurityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
