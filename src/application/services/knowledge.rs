use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    chunk_markdown,
    ports::{ContentRegistry, EmbeddingService, VectorStore},
    Document, DomainError, SearchResult,
};

/// The knowledge index of a retrieval session: an embedding function, a
/// vector store, and the registry of already-ingested content.
pub struct KnowledgeIndex {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    registry: Arc<dyn ContentRegistry>,
    max_results: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    pub ingested: usize,
    pub skipped: usize,
    pub chunks: usize,
}

impl KnowledgeIndex {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        registry: Arc<dyn ContentRegistry>,
        max_results: usize,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            registry,
            max_results,
        }
    }

    /// Ingests markdown documents: read, hash, chunk, embed, upsert.
    ///
    /// Documents whose content hash is already registered are skipped. At
    /// most `max_documents` paths are processed. A document is recorded in
    /// the registry only after all of its chunks are stored, so a failed
    /// document is picked up again on the next run.
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub async fn ingest_paths(
        &self,
        paths: &[String],
        chunk_size: usize,
        overlap: usize,
        max_documents: usize,
    ) -> Result<IngestReport, DomainError> {
        if paths.len() > max_documents {
            tracing::warn!(
                given = paths.len(),
                max_documents,
                "document cap exceeded, extra paths are ignored"
            );
        }

        let mut report = IngestReport::default();

        for path in paths.iter().take(max_documents) {
            let content = tokio::fs::read_to_string(path).await?;
            let content_hash = hex::encode(Sha256::digest(content.as_bytes()));

            if self.registry.contains(&content_hash).await? {
                tracing::debug!(%path, "content already ingested, skipping");
                report.skipped += 1;
                continue;
            }

            let doc = Document::new(path.as_str(), content_hash.as_str());
            let chunks = chunk_markdown(&doc, &content, chunk_size, overlap);

            if !chunks.is_empty() {
                let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
                let embeddings = self.embedding.embed_batch(&texts).await?;
                for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
                    self.vector_store.upsert(chunk, embedding).await?;
                }
            }

            self.registry.record(&content_hash, path).await?;
            tracing::debug!(%path, chunks = chunks.len(), "document ingested");
            report.ingested += 1;
            report.chunks += chunks.len();
        }

        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        self.vector_store.search(&embedding, self.max_results).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::Embedding;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Deterministic embedding derived from byte content, for tests.
    pub struct StubEmbedding;

    #[async_trait]
    impl EmbeddingService for StubEmbedding {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            let mut v = [0.0f32; 8];
            for (i, b) in text.bytes().enumerate() {
                v[i % 8] += f32::from(b) / 255.0;
            }
            Ok(Embedding::new(v.to_vec()))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            8
        }
    }

    #[derive(Default)]
    pub struct MemoryRegistry(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl ContentRegistry for MemoryRegistry {
        async fn contains(&self, content_hash: &str) -> Result<bool, DomainError> {
            Ok(self.0.lock().unwrap().contains_key(content_hash))
        }

        async fn record(&self, content_hash: &str, source: &str) -> Result<(), DomainError> {
            self.0
                .lock()
                .unwrap()
                .insert(content_hash.to_string(), source.to_string());
            Ok(())
        }

        async fn count(&self) -> Result<usize, DomainError> {
            Ok(self.0.lock().unwrap().len())
        }
    }
}
