//! Identity resolution for the settings workflow.
//!
//! The workflow never reads ambient session state. Callers hand it an
//! [`IdentityResolver`] that knows how the current request was authenticated,
//! which keeps the workflow testable and framework-agnostic.

use async_trait::async_trait;

use crate::error::SettingsResult;

/// The authenticated principal a settings update runs on behalf of.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: String,
    /// Email the principal authenticated with, if any.
    pub email: Option<String>,
    /// Whether the current login came through an OAuth provider.
    ///
    /// OAuth-backed principals manage credentials at the provider, so the
    /// workflow strips email, password, and two-factor fields from their
    /// updates.
    pub is_oauth: bool,
}

impl Actor {
    /// Actor authenticated with a local credential.
    pub fn local(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            is_oauth: false,
        }
    }

    /// Actor authenticated through an OAuth provider.
    pub fn oauth(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            is_oauth: true,
        }
    }
}

/// Resolves the current authenticated principal.
///
/// Implement this over your session store, JWT middleware, or request guard.
/// `Ok(None)` means nobody is authenticated and the workflow answers
/// `Unauthorized`; `Err` means the identity layer itself failed.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn current_actor(&self) -> SettingsResult<Option<Actor>>;
}

/// Identity resolver that always yields the same principal.
///
/// Useful in tests and in frameworks that have already authenticated the
/// request before invoking the workflow.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    actor: Option<Actor>,
}

impl FixedIdentity {
    pub fn authenticated(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    pub fn anonymous() -> Self {
        Self { actor: None }
    }
}

#[async_trait]
impl IdentityResolver for FixedIdentity {
    async fn current_actor(&self) -> SettingsResult<Option<Actor>> {
        Ok(self.actor.clone())
    }
}
