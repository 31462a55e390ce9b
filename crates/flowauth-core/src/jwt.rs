// crates/flowauth-core/src/jwt.rs
// ============================================================================
// Module: JWT Claim Converter
// Description: Extracts and remaps a scope-bearing claim into authorities.
// Purpose: Turn JWT claims into an ordered authority list with remapping.
// Dependencies: serde_json, crate::authority
// ============================================================================

//! ## Overview
//! The converter reads a configurable claim (default: `scope`, then `scp`)
//! from a JWT claims map and turns its tokens into prefixed authorities.
//! Claim-name selection is by presence alone: a `scope` claim that is empty
//! or of an unsupported shape still shadows a populated `scp`. This looks
//! surprising but is pinned by long-standing behavior; do not "fix" it.
//!
//! A separate group-claim path is consulted only when a group claim name is
//! explicitly configured; well-known group claims (`roles`, `groups`)
//! contribute nothing on their own.
//!
//! Unlike the scope and LDAP paths, output here is an ordered list: source
//! order is preserved and duplicates are not collapsed. The asymmetry with
//! the set-valued paths is deliberate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::authority::Authority;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default prefix applied to converted authorities.
pub const DEFAULT_AUTHORITY_PREFIX: &str = "SCOPE_";

/// Claims probed, in order, when no claim name is configured.
const WELL_KNOWN_SCOPE_CLAIMS: [&str; 2] = ["scope", "scp"];

// ============================================================================
// SECTION: Converter
// ============================================================================

/// Converts JWT claims into an ordered list of granted authorities.
///
/// # Invariants
/// - Conversion never fails; unsupported claim shapes yield an empty list.
/// - Scope tokens precede group tokens; within each source, claim order is
///   preserved and duplicates are kept.
#[derive(Debug, Clone)]
pub struct MappingJwtAuthoritiesConverter {
    authority_prefix: String,
    authorities_claim_name: Option<String>,
    group_authorities_claim_name: Option<String>,
    authorities_mapping: BTreeMap<String, String>,
    group_authorities_mapping: BTreeMap<String, String>,
}

impl Default for MappingJwtAuthoritiesConverter {
    fn default() -> Self {
        Self {
            authority_prefix: DEFAULT_AUTHORITY_PREFIX.to_string(),
            authorities_claim_name: None,
            group_authorities_claim_name: None,
            authorities_mapping: BTreeMap::new(),
            group_authorities_mapping: BTreeMap::new(),
        }
    }
}

impl MappingJwtAuthoritiesConverter {
    /// Creates a converter with default settings (`SCOPE_` prefix, well-known
    /// scope claims, no remapping).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix applied to every produced authority.
    #[must_use]
    pub fn with_authority_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.authority_prefix = prefix.into();
        self
    }

    /// Pins the claim consulted for authorities instead of the well-known
    /// `scope`/`scp` probe order.
    #[must_use]
    pub fn with_authorities_claim_name(mut self, claim_name: impl Into<String>) -> Self {
        self.authorities_claim_name = Some(claim_name.into());
        self
    }

    /// Configures the claim consulted for group authorities. Without this,
    /// the group path is inactive.
    #[must_use]
    pub fn with_group_authorities_claim_name(mut self, claim_name: impl Into<String>) -> Self {
        self.group_authorities_claim_name = Some(claim_name.into());
        self
    }

    /// Sets the token remapping for the scope path. Tokens absent from the
    /// map pass through unchanged.
    #[must_use]
    pub fn with_authorities_mapping(mut self, mapping: BTreeMap<String, String>) -> Self {
        self.authorities_mapping = mapping;
        self
    }

    /// Sets the token remapping for the group path. Tokens absent from the
    /// map pass through unchanged.
    #[must_use]
    pub fn with_group_authorities_mapping(mut self, mapping: BTreeMap<String, String>) -> Self {
        self.group_authorities_mapping = mapping;
        self
    }

    /// Converts a claims map into the ordered authority list.
    #[must_use]
    pub fn convert(&self, claims: &Map<String, Value>) -> Vec<Authority> {
        let mut authorities = Vec::new();

        if let Some(value) = self.scope_claim(claims) {
            for token in scope_tokens(value) {
                authorities.push(self.wrap(token, &self.authorities_mapping));
            }
        }

        if let Some(name) = &self.group_authorities_claim_name
            && let Some(value) = claims.get(name)
        {
            for token in group_tokens(value) {
                authorities.push(self.wrap(token, &self.group_authorities_mapping));
            }
        }

        authorities
    }

    /// Selects the scope-bearing claim value. Selection is by presence: the
    /// configured name wins, else the first present well-known claim, even
    /// when its value turns out to be empty or unusable.
    fn scope_claim<'a>(&self, claims: &'a Map<String, Value>) -> Option<&'a Value> {
        if let Some(name) = &self.authorities_claim_name {
            return claims.get(name);
        }
        WELL_KNOWN_SCOPE_CLAIMS.iter().find_map(|name| claims.get(*name))
    }

    /// Remaps one token (pass-through on miss) and applies the prefix.
    fn wrap(&self, token: String, mapping: &BTreeMap<String, String>) -> Authority {
        let mapped = mapping.get(&token).cloned().unwrap_or(token);
        Authority::new(format!("{}{}", self.authority_prefix, mapped))
    }
}

// ============================================================================
// SECTION: Token Extraction
// ============================================================================

/// Extracts scope tokens: strings split on whitespace, arrays of strings
/// taken as-is, anything else treated as absent.
fn scope_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => text.split_whitespace().map(str::to_string).collect(),
        Value::Array(items) => string_elements(items),
        _ => Vec::new(),
    }
}

/// Extracts group tokens: no whitespace splitting on strings.
fn group_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) if !text.is_empty() => vec![text.clone()],
        Value::Array(items) => string_elements(items),
        _ => Vec::new(),
    }
}

/// Returns the array's elements when every element is a string, otherwise
/// treats the whole claim as unsupported.
fn string_elements(items: &[Value]) -> Vec<String> {
    let strings: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    strings.unwrap_or_default()
}
