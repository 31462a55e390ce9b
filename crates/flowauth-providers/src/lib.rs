// crates/flowauth-providers/src/lib.rs
// ============================================================================
// Module: Flowauth Providers
// Description: Remote authority resolution over HTTP.
// Purpose: Delegate role resolution to an external endpoint per bearer token.
// Dependencies: flowauth-core, reqwest
// ============================================================================

//! ## Overview
//! This crate ships the remote authority resolver: a blocking HTTP client
//! that asks an external endpoint which roles a bearer token carries. The
//! resolver makes exactly one synchronous call per invocation and propagates
//! every transport, status, and body failure unmodified. Timeouts, retries,
//! and caching belong to the client configuration or to decorators layered
//! around the narrow resolve seam; this crate intentionally omits them.
//!
//! Security posture: the endpoint response is untrusted; anything other than
//! a 2xx JSON array of bare role names is a hard failure.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod remote;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use remote::BearerTokenSource;
pub use remote::RemoteAuthoritiesResolver;
pub use remote::RemoteError;
