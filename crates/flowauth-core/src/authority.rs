// crates/flowauth-core/src/authority.rs
// ============================================================================
// Module: Authority Value
// Description: Granted-authority string produced by the mapping strategies.
// Purpose: Provide a typed, serializable output value with a stable wire form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Authority`] is the single output value of every mapping strategy: a
//! string of the form `<prefix><name>`. The type is opaque; no normalization
//! or validation is applied here. Set-valued paths collect authorities into
//! `BTreeSet<Authority>`, while the JWT claim path returns `Vec<Authority>`
//! with source order and duplicates preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Authority Type
// ============================================================================

/// A granted authority string (`<prefix><name>`).
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Creates a new authority value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the authority as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Authority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Authority {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
