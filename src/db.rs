use once_cell::sync::Lazy;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::config::Config;
use crate::error::{PortalError, Result};

pub static DB: Lazy<Surreal<Any>> = Lazy::new(Surreal::init);

#[derive(Clone, Debug)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Connects the process-wide handle and selects the portal namespace/database.
pub async fn init_connection(config: &Config) -> Result<Surreal<Any>> {
    let url = config.db_url.trim();
    if url.is_empty() || url.ends_with("://") {
        return Err(PortalError::Config(format!(
            "invalid datastore url {:?}",
            config.db_url
        )));
    }

    let endpoint = if url.contains("://") {
        url.to_string()
    } else {
        format!("ws://{}", url)
    };

    DB.connect(endpoint.as_str()).await?;

    // the in-memory engine has no root user to sign in as
    if !endpoint.starts_with("mem://") {
        DB.signin(Root {
            username: config.cred.user.as_str(),
            password: config.cred.pass.as_str(),
        })
        .await?;
    }

    DB.use_ns(&config.namespace).use_db(&config.database).await?;
    info!(endpoint = %endpoint, ns = %config.namespace, db = %config.database, "connected to datastore");

    Ok(DB.clone())
}
