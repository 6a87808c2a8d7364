use std::sync::Arc;

use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use crate::error::Result;
use crate::models::announcement::Announcement;
use crate::models::document::Document;
use crate::models::faq::Faq;
use crate::models::form::FormEntry;
use crate::modules::content::ContentStore;
use crate::modules::status::{compute_statuses, Clock, StatusBuckets};

/// Public, read-only side of the portal.
#[derive(Clone)]
pub struct Portal {
    db: Surreal<Any>,
    clock: Arc<dyn Clock>,
}

impl Portal {
    pub fn new(db: Surreal<Any>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Forms split into open, upcoming and closed, newest start date first.
    pub async fn forms_by_status(&self) -> Result<StatusBuckets<FormEntry>> {
        let forms = ContentStore::<FormEntry>::new(self.db.clone()).list().await?;

        Ok(StatusBuckets::partition(compute_statuses(&*self.clock, &forms)))
    }

    pub async fn announcements(&self) -> Result<Vec<Announcement>> {
        ContentStore::new(self.db.clone()).list().await
    }

    pub async fn faqs(&self) -> Result<Vec<Faq>> {
        ContentStore::new(self.db.clone()).list().await
    }

    pub async fn documents(&self) -> Result<Vec<Document>> {
        ContentStore::new(self.db.clone()).list().await
    }
}
