use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::domain::{ports::ContentRegistry, DomainError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryEntry {
    source: String,
    ingested_at: DateTime<Utc>,
}

/// Content registry persisted as a single JSON file mapping content hashes
/// to their source path and ingestion time. The file accumulates across
/// process runs; recording rewrites it whole.
pub struct JsonContentRegistry {
    path: PathBuf,
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl JsonContentRegistry {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DomainError::internal(format!(
                    "corrupt content registry {}: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn persist(&self) -> Result<(), DomainError> {
        let snapshot = self
            .entries
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .clone();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;

        Ok(())
    }
}

#[async_trait]
impl ContentRegistry for JsonContentRegistry {
    async fn contains(&self, content_hash: &str) -> Result<bool, DomainError> {
        Ok(self
            .entries
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .contains_key(content_hash))
    }

    async fn record(&self, content_hash: &str, source: &str) -> Result<(), DomainError> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|e| DomainError::internal(e.to_string()))?;

            entries.insert(
                content_hash.to_string(),
                RegistryEntry {
                    source: source.to_string(),
                    ingested_at: Utc::now(),
                },
            );
        }

        self.persist().await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self
            .entries
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_and_finds_content_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let registry = JsonContentRegistry::open(dir.path().join("contents_db.json"))
            .await
            .unwrap();

        assert!(!registry.contains("hash-a").await.unwrap());
        registry.record("hash-a", "doc.md").await.unwrap();
        assert!(registry.contains("hash-a").await.unwrap());
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn recording_the_same_hash_twice_keeps_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let registry = JsonContentRegistry::open(dir.path().join("contents_db.json"))
            .await
            .unwrap();

        registry.record("hash-a", "doc.md").await.unwrap();
        registry.record("hash-a", "copy-of-doc.md").await.unwrap();

        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn entries_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contents_db.json");

        let registry = JsonContentRegistry::open(&path).await.unwrap();
        registry.record("hash-a", "doc.md").await.unwrap();
        registry.record("hash-b", "other.md").await.unwrap();
        drop(registry);

        let reopened = JsonContentRegistry::open(&path).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 2);
        assert!(reopened.contains("hash-b").await.unwrap());
    }

    #[tokio::test]
    async fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp/nested/contents_db.json");

        let registry = JsonContentRegistry::open(&path).await.unwrap();
        registry.record("hash-a", "doc.md").await.unwrap();

        assert!(path.exists());
    }
}
