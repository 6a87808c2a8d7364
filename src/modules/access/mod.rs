mod source;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::principal::Principal;
use crate::modules::identity::IdentityProvider;

pub use source::SurrealAllowList;

/// Where the admin allow-list comes from. Implementations return the
/// lowercased emails, an empty list when the config record is missing, and
/// an error only when the list could not be read at all.
#[async_trait]
pub trait AllowListSource: Send + Sync + 'static {
    async fn allowed_emails(&self) -> Result<Vec<String>>;
}

/// Decides whether a principal may use the admin console.
#[derive(Clone)]
pub struct AccessGate {
    source: Arc<dyn AllowListSource>,
    identity: Arc<dyn IdentityProvider>,
}

impl AccessGate {
    pub fn new(source: Arc<dyn AllowListSource>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { source, identity }
    }

    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    /// `Ok(false)` when the principal is missing, has no email or is not on
    /// the list. A failed fetch is returned as `Err`, never as `false`.
    pub async fn is_authorized(&self, principal: Option<&Principal>) -> Result<bool> {
        let Some(email) = principal.and_then(|p| p.email.as_deref()) else {
            return Ok(false);
        };

        let email = email.to_lowercase();
        let allowed = self.source.allowed_emails().await?;
        let authorized = allowed.iter().any(|entry| entry.to_lowercase() == email);
        debug!(authorized, "checked admin allow-list");

        Ok(authorized)
    }

    /// Signs `principal` out and reports `reason`, if any. A session that
    /// has since moved to another principal is left alone.
    pub async fn revoke_and_notify(
        &self,
        principal: &Principal,
        reason: Option<&str>,
    ) -> Result<()> {
        let still_current = self
            .identity
            .current()
            .is_some_and(|current| current.uid == principal.uid);

        if still_current {
            self.identity.sign_out().await?;
        } else {
            debug!(uid = %principal.uid, "session already changed, nothing to revoke");
        }

        if let Some(reason) = reason {
            warn!("{reason}");
        }

        Ok(())
    }
}
