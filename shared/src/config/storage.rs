//! Record storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::env_non_empty;

/// Storage back end for the verification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart
    Memory,
    /// JSON file on local disk
    #[default]
    File,
    /// Redis server
    Redis,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path of the JSON file used by the file back end
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix applied to Redis keys
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            file_path: default_file_path(),
            redis_url: default_redis_url(),
            key_prefix: None,
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_non_empty("STORAGE_BACKEND")
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.backend),
            file_path: env_non_empty("STORAGE_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            redis_url: env_non_empty("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env_non_empty("REDIS_KEY_PREFIX"),
        }
    }

    /// Generate a storage key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from(".raseed/storage.json")
}

fn default_redis_url() -> String {
    String::from("redis://localhost:6379")
}
