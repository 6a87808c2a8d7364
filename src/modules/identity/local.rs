use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use super::{IdentityEvent, IdentityEventKind, IdentityProvider};
use crate::error::Result;
use crate::models::principal::Principal;

/// In-process identity provider backed by a watch channel.
#[derive(Clone)]
pub struct LocalIdentity {
    tx: watch::Sender<IdentityEvent>,
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalIdentity {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(IdentityEvent::signed_out());

        Self { tx }
    }

    /// Starts a session for `email`, replacing any existing one.
    pub fn sign_in(&self, email: impl Into<String>) -> Principal {
        let principal = Principal::new(Uuid::new_v4().to_string(), email);
        debug!(uid = %principal.uid, "signed in");

        self.tx.send_replace(IdentityEvent {
            kind: IdentityEventKind::SignedIn,
            principal: Some(principal.clone()),
        });

        principal
    }

    /// Re-announces the current principal, as a token refresh does.
    pub fn refresh_token(&self) {
        let principal = self.current();
        if principal.is_none() {
            return;
        }

        self.tx.send_replace(IdentityEvent {
            kind: IdentityEventKind::TokenRefreshed,
            principal,
        });
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    fn current(&self) -> Option<Principal> {
        self.tx.borrow().principal.clone()
    }

    fn subscribe(&self) -> BoxStream<'static, IdentityEvent> {
        let mut rx = self.tx.subscribe();
        let first = rx.borrow_and_update().clone();

        let changes = stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let event = rx.borrow_and_update().clone();

            Some((event, rx))
        });

        stream::once(async move { first }).chain(changes).boxed()
    }

    async fn sign_out(&self) -> Result<()> {
        if self.current().is_none() {
            return Ok(());
        }

        self.tx.send_replace(IdentityEvent::signed_out());
        debug!("signed out");

        Ok(())
    }
}
