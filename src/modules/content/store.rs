use std::marker::PhantomData;

use serde_json::Value;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::debug;

use super::Collection;
use crate::error::{PortalError, Result};
use crate::models::record_key;

/// Create/read/update/delete over one collection.
pub struct ContentStore<T> {
    db: Surreal<Any>,
    _kind: PhantomData<T>,
}

impl<T> Clone for ContentStore<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: Collection> ContentStore<T> {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        let Some(field) = T::ORDER_BY else {
            return Ok(self.db.select(T::TABLE).await?);
        };

        let sql = format!("SELECT * FROM {} ORDER BY {} DESC", T::TABLE, field);
        let mut res = self.db.query(sql).await?;

        Ok(res.take(0)?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.db.select((T::TABLE, id)).await?)
    }

    pub async fn count(&self) -> Result<usize> {
        let sql = format!("SELECT count() FROM {} GROUP ALL", T::TABLE);
        let mut res = self.db.query(sql).await?;
        // an empty table yields no row at all
        let count: Option<usize> = res.take((0, "count"))?;

        Ok(count.unwrap_or(0))
    }

    /// Stores a new record under a generated id and returns that id.
    pub async fn create(&self, draft: T) -> Result<String> {
        let mut content = serde_json::to_value(&draft)?;
        strip_fields(&mut content, &["id"]);

        let created: Vec<T> = self.db.create(T::TABLE).content(content).await?;
        let id = created
            .first()
            .and_then(|record| record_key(record.id()))
            .ok_or_else(|| PortalError::NotFound(format!("{} record after create", T::TABLE)))?;

        debug!(table = T::TABLE, id = %id, "record created");

        Ok(id)
    }

    /// Merges `patch` into an existing record.
    pub async fn update(&self, id: &str, mut patch: Value) -> Result<T> {
        if self.get(id).await?.is_none() {
            return Err(PortalError::NotFound(format!("{}:{}", T::TABLE, id)));
        }

        strip_fields(&mut patch, T::READ_ONLY);

        let updated: Option<T> = self.db.update((T::TABLE, id)).merge(patch).await?;
        debug!(table = T::TABLE, id, "record updated");

        updated.ok_or_else(|| PortalError::NotFound(format!("{}:{}", T::TABLE, id)))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let deleted: Option<T> = self.db.delete((T::TABLE, id)).await?;
        if deleted.is_none() {
            return Err(PortalError::NotFound(format!("{}:{}", T::TABLE, id)));
        }

        debug!(table = T::TABLE, id, "record deleted");

        Ok(())
    }
}

fn strip_fields(value: &mut Value, fields: &[&str]) {
    if let Some(object) = value.as_object_mut() {
        for field in fields {
            object.remove(*field);
        }
    }
}
