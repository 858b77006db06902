use async_trait::async_trait;
use rig::providers::ollama;
use std::sync::Arc;
use tracing::info;

use crate::application::{AskParams, KnowledgeIndex, Session, SessionFactory};
use crate::domain::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::embedding::OllamaEmbedding;
use crate::infrastructure::llm::{OllamaChat, OllamaRagChat};
use crate::infrastructure::registry::JsonContentRegistry;
use crate::infrastructure::vector_store::QdrantVectorStore;

/// Qdrant collection shared by every session.
pub const COLLECTION_NAME: &str = "vectors";

/// Production session factory: builds one fresh session per request, wired
/// to the Ollama and Qdrant services named in the configuration. Documents
/// are re-ingested on every request; the content registry keeps repeats
/// cheap by skipping already-seen content.
pub struct OllamaSessionFactory {
    config: Arc<AppConfig>,
}

impl OllamaSessionFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<ollama::Client, DomainError> {
        ollama::Client::builder()
            .api_key(rig::client::Nothing)
            .base_url(&self.config.ollama_url)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))
    }
}

#[async_trait]
impl SessionFactory for OllamaSessionFactory {
    async fn build(&self, params: AskParams) -> Result<Session, DomainError> {
        params.validate()?;

        if params.document_paths.is_empty() {
            tracing::debug!(model = %params.chat_model, "building session without retrieval");
            let agent = Arc::new(OllamaChat::new(self.client()?, &params.chat_model));
            return Ok(Session::no_retrieval(agent));
        }

        tracing::debug!(
            model = %params.chat_model,
            documents = params.document_paths.len(),
            "building session with retrieval"
        );

        let embedding = Arc::new(OllamaEmbedding::new(
            self.client()?,
            &params.embeddings_model,
            self.config.embedding_dimension,
        ));
        let vector_store = Arc::new(
            QdrantVectorStore::connect(
                &self.config.qdrant_url,
                COLLECTION_NAME,
                self.config.embedding_dimension,
            )
            .await?,
        );
        let registry = Arc::new(JsonContentRegistry::open(self.config.registry_path.clone()).await?);
        let index = Arc::new(KnowledgeIndex::new(
            embedding,
            vector_store,
            registry,
            params.k,
        ));

        let report = index
            .ingest_paths(
                &params.document_paths,
                params.chunk_size,
                params.overlap,
                self.config.max_documents,
            )
            .await?;
        info!(
            ingested = report.ingested,
            skipped = report.skipped,
            chunks = report.chunks,
            "document ingestion finished"
        );

        let agent = Arc::new(OllamaRagChat::new(
            self.client()?,
            &params.chat_model,
            index.clone(),
        ));
        Ok(Session::with_retrieval(agent, index))
    }
}
