pub mod console;
pub mod store;

use serde::de::DeserializeOwned;
use serde::Serialize;
use surrealdb::sql::Thing;

use crate::models::announcement::Announcement;
use crate::models::document::Document;
use crate::models::faq::Faq;
use crate::models::form::FormEntry;

pub use console::{AdminConsole, DashboardStats};
pub use store::ContentStore;

/// A record kind stored in its own table.
pub trait Collection: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: &'static str;
    /// Field listed newest first, if the collection is ordered at all.
    const ORDER_BY: Option<&'static str> = None;
    /// Fields a patch may never write.
    const READ_ONLY: &'static [&'static str] = &["id"];

    fn id(&self) -> &Option<Thing>;
}

impl Collection for FormEntry {
    const TABLE: &'static str = "forms";
    const ORDER_BY: Option<&'static str> = Some("startDate");
    // status is derived on read, never written
    const READ_ONLY: &'static [&'static str] = &["id", "status"];

    fn id(&self) -> &Option<Thing> {
        &self.id
    }
}

impl Collection for Announcement {
    const TABLE: &'static str = "announcements";
    const ORDER_BY: Option<&'static str> = Some("date");

    fn id(&self) -> &Option<Thing> {
        &self.id
    }
}

impl Collection for Faq {
    const TABLE: &'static str = "faqs";

    fn id(&self) -> &Option<Thing> {
        &self.id
    }
}

impl Collection for Document {
    const TABLE: &'static str = "documents";

    fn id(&self) -> &Option<Thing> {
        &self.id
    }
}
