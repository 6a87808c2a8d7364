use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use iic_portal::error::{PortalError, Result};
use iic_portal::models::principal::Principal;
use iic_portal::modules::access::{AccessGate, AllowListSource};
use iic_portal::modules::identity::{IdentityEvent, IdentityEventKind, IdentityProvider, LocalIdentity};
use iic_portal::modules::session::{SessionGate, SessionListener, SessionState, UNAUTHORIZED_REASON};

struct SwitchableAllowList {
    emails: Vec<String>,
    down: AtomicBool,
}

#[async_trait]
impl AllowListSource for SwitchableAllowList {
    async fn allowed_emails(&self) -> Result<Vec<String>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(PortalError::Identity("allow-list unavailable".to_string()));
        }

        Ok(self.emails.clone())
    }
}

#[derive(Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionListener for Recorder {
    async fn on_authorized(&self, principal: &Principal) {
        let email = principal.email.clone().unwrap_or_default();
        self.seen.lock().unwrap().push(format!("authorized {email}"));
    }

    async fn on_unauthorized(&self, reason: Option<&str>) {
        self.seen
            .lock()
            .unwrap()
            .push(format!("login {}", reason.unwrap_or("-")));
    }

    async fn on_check_failed(&self, _error: &PortalError) {
        self.seen.lock().unwrap().push("failed".to_string());
    }
}

fn setup() -> (SessionGate, Arc<LocalIdentity>, Arc<SwitchableAllowList>, Recorder) {
    let source = Arc::new(SwitchableAllowList {
        emails: vec!["admin@example.com".to_string()],
        down: AtomicBool::new(false),
    });
    let identity = Arc::new(LocalIdentity::new());
    let recorder = Recorder::default();

    let mut session = SessionGate::new(AccessGate::new(source.clone(), identity.clone()));
    session.add_listener(recorder.clone());

    (session, identity, source, recorder)
}

/// Lets an admin sign in while a check is still reading the list.
struct SignInDuringFetch {
    identity: Arc<LocalIdentity>,
}

#[async_trait]
impl AllowListSource for SignInDuringFetch {
    async fn allowed_emails(&self) -> Result<Vec<String>> {
        self.identity.sign_in("admin@example.com");

        Ok(vec!["admin@example.com".to_string()])
    }
}

fn event(kind: IdentityEventKind, email: &str) -> IdentityEvent {
    IdentityEvent {
        kind,
        principal: Some(Principal::new("u1", email)),
    }
}

#[tokio::test]
async fn test_no_principal_goes_to_login() {
    let (session, _, _, recorder) = setup();

    let state = session.handle_event(IdentityEvent::signed_out()).await;

    assert_eq!(state, SessionState::Unauthorized(None));
    assert_eq!(recorder.seen(), vec!["login -"]);
}

#[tokio::test]
async fn test_allowed_principal_is_authorized() {
    let (session, _, _, recorder) = setup();

    let state = session
        .handle_event(event(IdentityEventKind::SignedIn, "Admin@Example.com"))
        .await;

    assert!(state.is_authorized());
    assert_eq!(*session.state().borrow(), state);
    assert_eq!(recorder.seen(), vec!["authorized Admin@Example.com"]);
}

#[tokio::test]
async fn test_unlisted_principal_is_signed_out() {
    let (session, identity, _, recorder) = setup();
    let student = identity.sign_in("student@example.com");

    let state = session
        .handle_event(IdentityEvent {
            kind: IdentityEventKind::SignedIn,
            principal: Some(student),
        })
        .await;

    assert_eq!(
        state,
        SessionState::Unauthorized(Some(UNAUTHORIZED_REASON.to_string()))
    );
    assert!(identity.current().is_none());
    assert_eq!(recorder.seen(), vec![format!("login {UNAUTHORIZED_REASON}")]);
}

#[tokio::test]
async fn test_failed_check_keeps_session() {
    let (session, identity, source, recorder) = setup();
    identity.sign_in("admin@example.com");
    source.down.store(true, Ordering::SeqCst);

    let state = session
        .handle_event(event(IdentityEventKind::TokenRefreshed, "admin@example.com"))
        .await;

    assert!(matches!(state, SessionState::CheckFailed(_)));
    assert!(identity.current().is_some());
    assert_eq!(recorder.seen(), vec!["failed"]);
}

#[tokio::test]
async fn test_revalidates_on_every_change() {
    let (session, identity, _, recorder) = setup();
    let mut state = session.state();
    let session = Arc::new(session);

    let runner = session.clone();
    let task = tokio::spawn(async move { runner.start().await });

    state
        .wait_for(|s| *s == SessionState::Unauthorized(None))
        .await
        .unwrap();

    identity.sign_in("admin@example.com");
    state.wait_for(|s| s.is_authorized()).await.unwrap();

    identity.sign_out().await.unwrap();
    state
        .wait_for(|s| *s == SessionState::Unauthorized(None))
        .await
        .unwrap();

    // let the listener calls for the last event land
    tokio::time::sleep(Duration::from_millis(20)).await;
    task.abort();

    assert_eq!(
        recorder.seen(),
        vec!["login -", "authorized admin@example.com", "login -"]
    );
}

#[tokio::test]
async fn test_late_rejection_keeps_newer_session() {
    let identity = Arc::new(LocalIdentity::new());
    let source = Arc::new(SignInDuringFetch {
        identity: identity.clone(),
    });
    let session = SessionGate::new(AccessGate::new(source, identity.clone()));

    let student = identity.sign_in("student@example.com");
    let state = session
        .handle_event(IdentityEvent {
            kind: IdentityEventKind::SignedIn,
            principal: Some(student),
        })
        .await;

    assert_eq!(
        state,
        SessionState::Unauthorized(Some(UNAUTHORIZED_REASON.to_string()))
    );

    let current = identity.current().unwrap();
    assert_eq!(current.email.as_deref(), Some("admin@example.com"));

    let state = session
        .handle_event(IdentityEvent {
            kind: IdentityEventKind::SignedIn,
            principal: Some(current),
        })
        .await;
    assert!(state.is_authorized());
}
