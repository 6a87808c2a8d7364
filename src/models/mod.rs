pub mod admin;
pub mod announcement;
pub mod document;
pub mod faq;
pub mod form;
pub mod principal;

use surrealdb::sql::Thing;

/// Raw key of a record id (`forms:abc` -> `abc`).
pub fn record_key(id: &Option<Thing>) -> Option<String> {
    id.as_ref().map(|thing| thing.id.to_raw())
}
