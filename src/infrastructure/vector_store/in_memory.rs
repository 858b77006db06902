use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{ports::VectorStore, DocumentChunk, DomainError, Embedding, SearchResult};

/// HashMap-backed vector store, a deterministic stand-in for Qdrant in tests.
pub struct InMemoryVectorStore {
    points: RwLock<HashMap<Uuid, (DocumentChunk, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            points: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        chunk: &DocumentChunk,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        let mut points = self
            .points
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        points.insert(chunk.id, (chunk.clone(), embedding.clone()));
        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let points = self
            .points
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<SearchResult> = points
            .values()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_ranks_by_similarity_and_honors_top_k() {
        let store = InMemoryVectorStore::new();
        let doc_id = Uuid::new_v4();

        let close = DocumentChunk::new(doc_id, "a.md", "close", 0);
        let far = DocumentChunk::new(doc_id, "a.md", "far", 1);
        store
            .upsert(&close, &Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert(&far, &Embedding::new(vec![0.0, 1.0]))
            .await
            .unwrap();

        let query = Embedding::new(vec![1.0, 0.1]);
        let results = store.search(&query, 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "close");
    }

    #[tokio::test]
    async fn upserting_the_same_chunk_replaces_it() {
        let store = InMemoryVectorStore::new();
        let chunk = DocumentChunk::new(Uuid::new_v4(), "a.md", "v1", 0);

        store
            .upsert(&chunk, &Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert(&chunk, &Embedding::new(vec![0.0, 1.0]))
            .await
            .unwrap();

        let results = store
            .search(&Embedding::new(vec![0.0, 1.0]), 10)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }
}
