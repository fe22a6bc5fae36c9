use anyhow::{Context, Result};
use std::collections::HashMap;

use super::{AuthGate, Credentials};

/// Maps usernames to passwords.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "analyst": "correct horse battery staple",
///   "reviewer": "another passphrase"
/// }
/// ```
pub struct CredentialTable {
    entries: HashMap<String, String>,
}

impl CredentialTable {
    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {path}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(content).context("Credentials file is not a JSON object of strings")?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AuthGate for CredentialTable {
    /// The username is trimmed before lookup; the password must match exactly.
    fn is_authorized(&self, credentials: &Credentials) -> bool {
        self.entries
            .get(credentials.username.trim())
            .is_some_and(|expected| *expected == credentials.password)
    }
}
