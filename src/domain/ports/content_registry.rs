use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Tracks which document contents have already been ingested, keyed by
/// content hash, so repeat ingestion can be skipped.
#[async_trait]
pub trait ContentRegistry: Send + Sync {
    async fn contains(&self, content_hash: &str) -> Result<bool, DomainError>;
    async fn record(&self, content_hash: &str, source: &str) -> Result<(), DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}
