use serde::Deserialize;
use serde_json::Value;

pub const ADMINS_TABLE: &str = "admins";
pub const ALLOWED_KEY: &str = "allowed";

/// The singleton `admins:allowed` record.
#[derive(Debug, Default, Deserialize)]
pub struct AllowedAdmins {
    #[serde(default)]
    pub emails: Value,
}

impl AllowedAdmins {
    /// Lowercased allow-list. Anything but an array counts as empty; non-string
    /// entries are stringified.
    pub fn normalized(&self) -> Vec<String> {
        let Value::Array(entries) = &self.emails else {
            return vec![];
        };

        entries
            .iter()
            .map(|entry| match entry {
                Value::String(email) => email.to_lowercase(),
                other => other.to_string().to_lowercase(),
            })
            .collect()
    }
}
