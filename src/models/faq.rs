use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub question: String,
    pub answer: String,
}
