// crates/flowauth-providers/src/remote.rs
// ============================================================================
// Module: Remote Authority Resolver
// Description: Resolves granted authorities from an external HTTP endpoint.
// Purpose: Issue one GET per resolution and convert bare role names to roles.
// Dependencies: flowauth-core, reqwest
// ============================================================================

//! ## Overview
//! Two resolution variants exist. The legacy variant takes an explicit
//! bearer token and sends `Authorization: bearer <token>` (lower-case
//! scheme). The principal-bound variant obtains the token from a
//! [`BearerTokenSource`] representing the current principal's
//! authorized-client state and sends the RFC-cased `Authorization: Bearer
//! <token>`. Both expect a JSON array of bare role-name strings and prefix
//! each element with `ROLE_`.
//!
//! Failures propagate unmodified: no retry, no fallback, no caching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use flowauth_core::Authority;
use flowauth_core::SecurityRole;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Remote resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Failures are surfaced to the caller exactly once, with no retry.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network-level failure reaching the endpoint.
    #[error("remote authorities transport error: {0}")]
    Transport(String),
    /// Endpoint answered with a non-2xx status.
    #[error("remote authorities endpoint returned status {0}")]
    Status(u16),
    /// Response was not `application/json` or not a JSON array of role-name
    /// strings.
    #[error("remote authorities response invalid: {0}")]
    InvalidBody(String),
    /// No bearer token is available for the current principal.
    #[error("no bearer token available for the current principal")]
    TokenUnavailable,
}

// ============================================================================
// SECTION: Token Source
// ============================================================================

/// Supplies the current principal's bearer token.
///
/// Implementations typically read the authorized-client state kept by the
/// surrounding security layer. Returning `None` fails resolution with
/// [`RemoteError::TokenUnavailable`].
pub trait BearerTokenSource {
    /// Returns the access token for the current principal, if any.
    fn access_token(&self) -> Option<String>;
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves granted authorities from an external HTTP endpoint.
///
/// # Invariants
/// - Exactly one outbound GET per resolution call.
/// - The response must be a 2xx `application/json` array of bare role names;
///   every element becomes `ROLE_<name>`.
/// - Immutable after construction; safe for concurrent use.
pub struct RemoteAuthoritiesResolver {
    /// HTTP client used for outbound requests; carries whatever timeout
    /// policy the caller configured.
    client: Client,
    /// Endpoint queried for the principal's role list.
    target: Url,
}

impl RemoteAuthoritiesResolver {
    /// Creates a resolver for the given endpoint.
    #[must_use]
    pub const fn new(client: Client, target: Url) -> Self {
        Self {
            client,
            target,
        }
    }

    /// Resolves authorities using an explicit bearer token (legacy variant,
    /// lower-case `bearer` scheme).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport failure, non-2xx status, or an
    /// invalid response body.
    pub fn resolve_with_token(&self, token: &str) -> Result<BTreeSet<Authority>, RemoteError> {
        self.fetch(&format!("bearer {token}"))
    }

    /// Resolves authorities for the current principal, obtaining the token
    /// from `source` (RFC-cased `Bearer` scheme).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::TokenUnavailable`] when the source has no
    /// token, otherwise the same failures as [`Self::resolve_with_token`].
    pub fn resolve(
        &self,
        source: &dyn BearerTokenSource,
    ) -> Result<BTreeSet<Authority>, RemoteError> {
        let token = source.access_token().ok_or(RemoteError::TokenUnavailable)?;
        self.fetch(&format!("Bearer {token}"))
    }

    /// Issues the single GET and converts the response body.
    fn fetch(&self, authorization: &str) -> Result<BTreeSet<Authority>, RemoteError> {
        let response = self
            .client
            .get(self.target.clone())
            .header(AUTHORIZATION, authorization)
            .send()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !content_type.starts_with("application/json") {
            return Err(RemoteError::InvalidBody(format!(
                "unexpected content type: {content_type:?}"
            )));
        }

        let names: Vec<String> =
            response.json().map_err(|err| RemoteError::InvalidBody(err.to_string()))?;

        Ok(names
            .iter()
            .map(|name| Authority::new(format!("{}{name}", SecurityRole::AUTHORITY_PREFIX)))
            .collect())
    }
}
