mod local;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::models::principal::Principal;

pub use local::LocalIdentity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityEvent {
    pub kind: IdentityEventKind,
    pub principal: Option<Principal>,
}

impl IdentityEvent {
    pub fn signed_out() -> Self {
        Self {
            kind: IdentityEventKind::SignedOut,
            principal: None,
        }
    }
}

/// External sign-in service. The portal only reads the current principal,
/// follows its changes and signs it out.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    fn current(&self) -> Option<Principal>;

    /// Stream of identity changes. The first item reflects the state at the
    /// time of subscribing.
    fn subscribe(&self) -> BoxStream<'static, IdentityEvent>;

    /// Ends the current session. Calling it with no session is a no-op.
    async fn sign_out(&self) -> Result<()>;
}
