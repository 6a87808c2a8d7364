use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, error, warn};

use super::AllowListSource;
use crate::error::Result;
use crate::models::admin::{AllowedAdmins, ADMINS_TABLE, ALLOWED_KEY};

/// Reads `admins:allowed` on every call.
#[derive(Clone)]
pub struct SurrealAllowList {
    db: Surreal<Any>,
}

impl SurrealAllowList {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AllowListSource for SurrealAllowList {
    async fn allowed_emails(&self) -> Result<Vec<String>> {
        let record: Option<AllowedAdmins> = self
            .db
            .select((ADMINS_TABLE, ALLOWED_KEY))
            .await
            .map_err(|e| {
                error!("failed to fetch allowed emails: {e}");
                e
            })?;

        let Some(record) = record else {
            warn!("{}:{} record does not exist", ADMINS_TABLE, ALLOWED_KEY);
            return Ok(vec![]);
        };

        let emails = record.normalized();
        debug!(count = emails.len(), "allowed emails fetched");

        Ok(emails)
    }
}
