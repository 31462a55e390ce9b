// crates/flowauth-core/src/error.rs
// ============================================================================
// Module: Mapping Errors
// Description: Error taxonomy for role-mapping construction and resolution.
// Purpose: Separate fatal configuration failures from caller bugs.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Two error classes exist in this crate. Configuration errors surface at
//! construction and are fatal: an identity-provider integration with an
//! incomplete role mapping must not start. Invalid-argument errors indicate a
//! caller bug at resolution time and propagate as-is. Unsupported claim
//! shapes are deliberately *not* errors; those paths yield empty results.
//!
//! The configuration messages are a pinned contract. The scope mapper reports
//! missing roles comma+space separated with a trailing period; the LDAP
//! mapper reports them comma-separated with no space. The two formats are
//! contract-tested independently and must not be unified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Role-mapping errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Configuration` display output reproduces the per-component missing-role
///   report verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// Incomplete or invalid mapping detected at construction. Fatal.
    #[error("{0}")]
    Configuration(String),
    /// Invalid argument supplied to a resolution call. Caller bug.
    #[error("{0}")]
    InvalidArgument(String),
}
