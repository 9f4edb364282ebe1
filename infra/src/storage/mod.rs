//! Storage back ends for the verification record

use raseed_core::services::verification::KeyValueStore;
use raseed_shared::config::{StorageBackend, StorageConfig};
use std::sync::Arc;

pub mod file;
pub mod memory;
#[cfg(feature = "redis-cache")]
pub mod redis_store;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisStore;

/// Create the configured store
pub async fn create_store(
    config: &StorageConfig,
) -> Result<Arc<dyn KeyValueStore>, crate::InfrastructureError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Storage back end: memory");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            tracing::info!(path = %config.file_path.display(), "Storage back end: file");
            Ok(Arc::new(FileStore::new(config.file_path.clone())))
        }
        #[cfg(feature = "redis-cache")]
        StorageBackend::Redis => {
            tracing::info!("Storage back end: redis");
            Ok(Arc::new(RedisStore::connect(config.clone()).await?))
        }
        #[cfg(not(feature = "redis-cache"))]
        StorageBackend::Redis => Err(crate::InfrastructureError::Config(
            "Redis storage requires the redis-cache feature".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_memory_store() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let store = create_store(&config).await.unwrap();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_create_file_store() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            file_path: dir.path().join("storage.json"),
            ..Default::default()
        };
        let store = create_store(&config).await.unwrap();
        store.set("k", "v").await.unwrap();
        assert!(dir.path().join("storage.json").exists());
    }

    #[cfg(not(feature = "redis-cache"))]
    #[tokio::test]
    async fn test_redis_backend_requires_feature() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            ..Default::default()
        };
        let result = create_store(&config).await;
        assert!(matches!(result, Err(crate::InfrastructureError::Config(_))));
    }

    #[cfg(feature = "redis-cache")]
    #[test]
    fn test_redis_errors_map_to_cache() {
        let err: crate::InfrastructureError =
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into();
        assert!(matches!(err, crate::InfrastructureError::Cache(_)));
    }
}
