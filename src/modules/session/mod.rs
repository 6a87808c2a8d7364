use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::PortalError;
use crate::models::principal::Principal;
use crate::modules::access::AccessGate;
use crate::modules::identity::IdentityEvent;

pub const UNAUTHORIZED_REASON: &str = "Your account is not allowed to access admin.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Checking,
    Authorized(Principal),
    /// No session, or the session was revoked for the given reason.
    Unauthorized(Option<String>),
    /// The allow-list could not be read; the session is left alone.
    CheckFailed(String),
}

impl SessionState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, SessionState::Authorized(_))
    }
}

/// Admin views hook in here to load data or send the user back to login.
#[async_trait]
pub trait SessionListener: Send + Sync + 'static {
    async fn on_authorized(&self, principal: &Principal);
    async fn on_unauthorized(&self, reason: Option<&str>);
    async fn on_check_failed(&self, _error: &PortalError) {}
}

/// Re-validates admin access on every identity change.
pub struct SessionGate {
    gate: AccessGate,
    state: watch::Sender<SessionState>,
    listeners: Vec<Arc<dyn SessionListener>>,
}

impl SessionGate {
    pub fn new(gate: AccessGate) -> Self {
        let (state, _) = watch::channel(SessionState::Checking);

        Self {
            gate,
            state,
            listeners: vec![],
        }
    }

    pub fn add_listener(&mut self, listener: impl SessionListener) {
        self.listeners.push(Arc::new(listener));
    }

    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Follows the identity provider until its stream ends.
    pub async fn start(&self) {
        let mut events = self.gate.identity().subscribe();

        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }

        info!("identity stream closed");
    }

    pub async fn handle_event(&self, event: IdentityEvent) -> SessionState {
        let Some(principal) = event.principal else {
            return self.deny(None).await;
        };

        self.state.send_replace(SessionState::Checking);

        match self.gate.is_authorized(Some(&principal)).await {
            Ok(true) => {
                info!(uid = %principal.uid, kind = ?event.kind, "admin session authorized");
                let state = SessionState::Authorized(principal.clone());
                self.state.send_replace(state.clone());

                for listener in &self.listeners {
                    listener.on_authorized(&principal).await;
                }

                state
            }
            Ok(false) => {
                if let Err(e) = self
                    .gate
                    .revoke_and_notify(&principal, Some(UNAUTHORIZED_REASON))
                    .await {
                    error!("failed to sign out unauthorized session: {e}");
                }

                self.deny(Some(UNAUTHORIZED_REASON)).await
            }
            Err(e) => {
                error!("admin check failed: {e}");
                let state = SessionState::CheckFailed(e.to_string());
                self.state.send_replace(state.clone());

                for listener in &self.listeners {
                    listener.on_check_failed(&e).await;
                }

                state
            }
        }
    }

    async fn deny(&self, reason: Option<&str>) -> SessionState {
        let state = SessionState::Unauthorized(reason.map(str::to_string));
        self.state.send_replace(state.clone());

        for listener in &self.listeners {
            listener.on_unauthorized(reason).await;
        }

        state
    }
}
