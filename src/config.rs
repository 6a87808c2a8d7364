use std::env;

use crate::db::Credentials;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_url: String,
    pub cred: Credentials,
    pub namespace: String,
    pub database: String,
    pub admin_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or empty keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db_host = var("DB_HOST", "localhost:8000");
        let db_port = var("DB_PORT", "");

        let db_url = if db_port.is_empty() {
            db_host
        } else {
            format!("{}:{}", db_host, db_port)
        };

        Self {
            db_url,
            cred: Credentials {
                user: var("DB_USER", "root"),
                pass: var("DB_PASS", "root"),
            },
            namespace: var("DB_NS", "portal"),
            database: var("DB_NAME", "main"),
            admin_email: lookup("PORTAL_ADMIN_EMAIL").filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.db_url, "localhost:8000");
        assert_eq!(config.cred.user, "root");
        assert_eq!(config.namespace, "portal");
        assert_eq!(config.database, "main");
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn port_is_appended_to_host() {
        let vars = HashMap::from([
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "8001"),
            ("PORTAL_ADMIN_EMAIL", "admin@example.com"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.db_url, "db.internal:8001");
        assert_eq!(config.admin_email.as_deref(), Some("admin@example.com"));
    }
}
