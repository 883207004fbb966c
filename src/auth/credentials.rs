//! Credential storage
//!
//! Loads the username → {password, department} mapping from a secrets file:
//!
//! ```toml
//! [[credentials]]
//! username = "alice"
//! password = "alice123"
//! department = "AI"
//! ```
//!
//! Records are kept read-only for the life of the process. Passwords are
//! compared in plaintext.

use config::{Config, ConfigError, File, Value};
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::AuthError;

const CREDENTIALS_KEY: &str = "credentials";
const DEFAULT_MAX_INPUT_LENGTH: usize = 64;

/// One entry as written in the secrets file; any field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCredential {
    username: Option<String>,
    password: Option<String>,
    department: Option<String>,
}

/// A stored credential. Missing fields make the record unusable for login.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub(crate) password: Option<String>,
    pub(crate) department: Option<String>,
}

/// Static credential store keyed by username
#[derive(Debug, Clone)]
pub struct CredentialStore {
    records: HashMap<String, CredentialRecord>,
    max_input_length: usize,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }
}

impl CredentialStore {
    /// Load credentials from the secrets file at `path` (extension optional).
    ///
    /// A missing file or a file without `[[credentials]]` yields an empty store,
    /// in which every login fails.
    pub fn load(path: &str, max_input_length: usize) -> Result<Self, AuthError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()
            .map_err(|e| AuthError::CredentialSource(e.to_string()))?;

        let entries = match settings.get_array(CREDENTIALS_KEY) {
            Ok(entries) => entries,
            Err(ConfigError::NotFound(_)) => {
                warn!("No credentials found in {}; every login will fail", path);
                Vec::new()
            }
            Err(e) => return Err(AuthError::CredentialSource(e.to_string())),
        };

        let store = Self::from_values(entries, max_input_length);
        info!("Loaded {} credential records from {}", store.len(), path);
        Ok(store)
    }

    fn from_values(entries: Vec<Value>, max_input_length: usize) -> Self {
        let mut store = Self {
            records: HashMap::new(),
            max_input_length,
        };

        for (index, value) in entries.into_iter().enumerate() {
            let raw: RawCredential = match value.try_deserialize() {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Ignoring malformed credential entry #{}: {}", index, e);
                    continue;
                }
            };

            let Some(username) = raw.username else {
                warn!("Ignoring credential entry #{} without a username", index);
                continue;
            };

            if raw.password.is_none() || raw.department.is_none() {
                warn!(
                    "Credential for {} lacks a password or department; it cannot log in",
                    username
                );
            }

            store.insert_record(
                username,
                CredentialRecord {
                    password: raw.password,
                    department: raw.department,
                },
            );
        }

        store
    }

    /// Add a complete record. The first record for a username wins.
    pub fn insert(&mut self, username: &str, password: &str, department: &str) {
        self.insert_record(
            username.to_string(),
            CredentialRecord {
                password: Some(password.to_string()),
                department: Some(department.to_string()),
            },
        );
    }

    fn insert_record(&mut self, username: String, record: CredentialRecord) {
        match self.records.entry(username) {
            Entry::Occupied(entry) => {
                warn!("Duplicate credential for {}; keeping the first", entry.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    pub fn lookup(&self, username: &str) -> Option<&CredentialRecord> {
        self.records.get(username)
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
