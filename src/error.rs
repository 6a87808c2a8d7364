use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, PortalError>;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("datastore: {0}")]
    Db(#[from] surrealdb::Error),
    #[error("not found {0:?}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("identity provider: {0}")]
    Identity(String),
    #[error("config: {0}")]
    Config(String),
    #[error("serde {0}")]
    Serde(#[from] serde_json::Error),
}
