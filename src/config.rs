//! Configuration management for the department share server
//!
//! Settings come from an optional `config.toml` with environment overrides
//! (`DEPT_SHARE_<SECTION>__<KEY>`). Every value has a default so the server
//! starts with no file at all.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "DEPT_SHARE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config";
const ENV_PREFIX: &str = "DEPT_SHARE";

/// Complete server configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub server: NetworkConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub limits: LimitsConfig,
}

/// Where the HTTP listener binds
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Upload tree layout
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Base folder holding every department folder and the global folder
    pub upload_root: String,

    /// Name of the shared folder visible to every department
    pub global_folder: String,

    /// Known departments; `name` is what credentials refer to, `slug` is the folder
    pub departments: Vec<DepartmentConfig>,

    /// Chunk size used when streaming uploads to disk
    pub buffer_size: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DepartmentConfig {
    pub name: String,
    pub slug: String,
}

/// Credential source and session lifetime
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Secrets file holding `[[credentials]]` records (extension optional)
    pub credentials_file: String,

    /// Longest username or password accepted before lookup
    pub max_input_length: usize,

    pub session_ttl_secs: u64,
}

/// Upload limits
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_file_size_mb: u64,
    pub max_filename_length: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: "uploads".to_string(),
            global_folder: "global".to_string(),
            departments: vec![
                DepartmentConfig::new("AI", "ai"),
                DepartmentConfig::new("Dev", "dev"),
                DepartmentConfig::new("Testing", "testing"),
            ],
            buffer_size: 64 * 1024,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_file: "secrets".to_string(),
            max_input_length: 64,
            session_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 1024,
            max_filename_length: 200,
        }
    }
}

impl DepartmentConfig {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the file named by `DEPT_SHARE_CONFIG` (default `config.toml`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from `path` with environment overrides
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage.upload_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "upload_root cannot be empty".into(),
            ));
        }

        if !is_plain_folder_name(&self.storage.global_folder) {
            return Err(config::ConfigError::Message(format!(
                "global_folder must be a plain folder name, got {:?}",
                self.storage.global_folder
            )));
        }

        let mut seen_slugs = HashSet::new();
        let mut seen_names = HashSet::new();
        for dept in &self.storage.departments {
            if !is_plain_folder_name(&dept.slug) {
                return Err(config::ConfigError::Message(format!(
                    "department slug must be a plain folder name, got {:?}",
                    dept.slug
                )));
            }
            if dept.slug == self.storage.global_folder {
                return Err(config::ConfigError::Message(format!(
                    "department slug {:?} collides with the global folder",
                    dept.slug
                )));
            }
            if !seen_slugs.insert(dept.slug.as_str()) {
                return Err(config::ConfigError::Message(format!(
                    "duplicate department slug {:?}",
                    dept.slug
                )));
            }
            if !seen_names.insert(dept.name.as_str()) {
                return Err(config::ConfigError::Message(format!(
                    "duplicate department name {:?}",
                    dept.name
                )));
            }
        }

        if self.storage.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.auth.session_ttl_secs == 0 {
            return Err(config::ConfigError::Message(
                "session_ttl_secs must be greater than 0".into(),
            ));
        }

        if self.limits.max_file_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_file_size_mb must be greater than 0".into(),
            ));
        }

        if self.limits.max_filename_length == 0 {
            return Err(config::ConfigError::Message(
                "max_filename_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Get upload root as PathBuf
    pub fn upload_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.upload_root)
    }

    /// Get maximum file size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.limits.max_file_size_mb * 1024 * 1024
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.session_ttl_secs)
    }
}

/// The staging folder starts with a dot, so dotted names are refused too.
fn is_plain_folder_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
