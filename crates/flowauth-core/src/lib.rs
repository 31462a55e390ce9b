// crates/flowauth-core/src/lib.rs
// ============================================================================
// Module: Flowauth Core
// Description: Role catalog and identity-evidence-to-role mapping strategies.
// Purpose: Translate scopes, directory authorities, and token claims into roles.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate maps heterogeneous identity evidence (OAuth2 token scopes, LDAP
//! granted-authority names, JWT claims) into the fixed internal set of
//! platform roles. Every mapper is constructed once from static configuration
//! and is immutable afterwards; resolution is a pure function over that
//! configuration plus fresh evidence.
//! Invariants:
//! - The role catalog is fixed at seven roles and never grows at runtime.
//! - Incomplete role mappings fail at construction, never at resolution.
//! - Scope, LDAP, and remote outputs are sets; the JWT path is an ordered list.
//!
//! Security posture: identity evidence is untrusted input; mappers validate
//! shape and fall back to empty results rather than guessing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authority;
pub mod error;
pub mod jwt;
pub mod ldap;
pub mod mapping;
pub mod roles;
pub mod scopes;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authority::Authority;
pub use error::MappingError;
pub use jwt::MappingJwtAuthoritiesConverter;
pub use ldap::LdapAuthoritiesMapper;
pub use mapping::ProviderRoleMapping;
pub use mapping::validate_coverage;
pub use roles::SecurityRole;
pub use scopes::ScopeAuthoritiesMapper;
