use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use iic_portal::config::Config;
use iic_portal::db;
use iic_portal::error::{PortalError, Result};
use iic_portal::models::principal::Principal;
use iic_portal::modules::access::{AccessGate, SurrealAllowList};
use iic_portal::modules::content::AdminConsole;
use iic_portal::modules::identity::LocalIdentity;
use iic_portal::modules::portal::Portal;
use iic_portal::modules::session::{SessionGate, SessionListener};
use iic_portal::modules::status::SystemClock;

struct DashboardLoader {
    console: AdminConsole,
}

#[async_trait]
impl SessionListener for DashboardLoader {
    async fn on_authorized(&self, principal: &Principal) {
        match self.console.dashboard_stats(principal).await {
            Ok(stats) => info!(
                forms = stats.forms,
                announcements = stats.announcements,
                faqs = stats.faqs,
                documents = stats.documents,
                "dashboard loaded"
            ),
            Err(e) => error!("failed to load dashboard: {e}"),
        }
    }

    async fn on_unauthorized(&self, reason: Option<&str>) {
        info!(reason = reason.unwrap_or("no session"), "back to admin login");
    }

    async fn on_check_failed(&self, error: &PortalError) {
        warn!("could not verify admin access, try again later: {error}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let db = db::init_connection(&config).await?;

    let portal = Portal::new(db.clone(), Arc::new(SystemClock));
    let forms = portal.forms_by_status().await?;
    info!(
        open = forms.open.len(),
        upcoming = forms.upcoming.len(),
        closed = forms.closed.len(),
        "forms loaded"
    );

    let identity = Arc::new(LocalIdentity::new());
    let gate = AccessGate::new(Arc::new(SurrealAllowList::new(db.clone())), identity.clone());

    let mut session = SessionGate::new(gate.clone());
    session.add_listener(DashboardLoader {
        console: AdminConsole::new(db, gate),
    });

    if let Some(email) = config.admin_email {
        identity.sign_in(email);
    }

    info!("Listening for session changes...");
    info!("Press Ctrl+C to stop.");

    tokio::select! {
        _ = session.start() => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("failed to listen for ctrl-c: {e}");
            }
        }
    }

    Ok(())
}
