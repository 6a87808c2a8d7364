use serde::Serialize;
use serde_json::Value;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::{Collection, ContentStore};
use crate::error::{PortalError, Result};
use crate::models::announcement::Announcement;
use crate::models::document::Document;
use crate::models::faq::Faq;
use crate::models::form::FormEntry;
use crate::models::principal::Principal;
use crate::modules::access::AccessGate;
use crate::modules::session::UNAUTHORIZED_REASON;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub forms: usize,
    pub announcements: usize,
    pub faqs: usize,
    pub documents: usize,
}

/// Admin-side access to every collection. Each call re-checks the acting
/// principal against the allow-list before touching the datastore.
#[derive(Clone)]
pub struct AdminConsole {
    db: Surreal<Any>,
    gate: AccessGate,
}

impl AdminConsole {
    pub fn new(db: Surreal<Any>, gate: AccessGate) -> Self {
        Self { db, gate }
    }

    fn store<T: Collection>(&self) -> ContentStore<T> {
        ContentStore::new(self.db.clone())
    }

    async fn authorize(&self, principal: &Principal) -> Result<()> {
        if self.gate.is_authorized(Some(principal)).await? {
            Ok(())
        } else {
            Err(PortalError::Unauthorized(UNAUTHORIZED_REASON.to_string()))
        }
    }

    pub async fn list<T: Collection>(&self, principal: &Principal) -> Result<Vec<T>> {
        self.authorize(principal).await?;
        self.store::<T>().list().await
    }

    pub async fn create<T: Collection>(&self, principal: &Principal, draft: T) -> Result<String> {
        self.authorize(principal).await?;
        self.store::<T>().create(draft).await
    }

    pub async fn update<T: Collection>(
        &self,
        principal: &Principal,
        id: &str,
        patch: Value,
    ) -> Result<T> {
        self.authorize(principal).await?;
        self.store::<T>().update(id, patch).await
    }

    pub async fn delete<T: Collection>(&self, principal: &Principal, id: &str) -> Result<()> {
        self.authorize(principal).await?;
        self.store::<T>().delete(id).await
    }

    pub async fn dashboard_stats(&self, principal: &Principal) -> Result<DashboardStats> {
        self.authorize(principal).await?;

        let forms = self.store::<FormEntry>();
        let announcements = self.store::<Announcement>();
        let faqs = self.store::<Faq>();
        let documents = self.store::<Document>();

        let (forms, announcements, faqs, documents) = tokio::try_join!(
            forms.count(),
            announcements.count(),
            faqs.count(),
            documents.count(),
        )?;

        Ok(DashboardStats {
            forms,
            announcements,
            faqs,
            documents,
        })
    }
}
