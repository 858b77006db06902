use async_trait::async_trait;
use std::sync::Arc;

use crate::application::services::knowledge::KnowledgeIndex;
use crate::domain::{ports::ChatService, DomainError};

/// Fixed instructions given to the conversational agent on every session.
pub const SYSTEM_INSTRUCTIONS: &str = "Search your knowledge base to answer the user's questions as best as you can.\n\
     Include source references in your responses when possible.";

/// Parameters of a single ask request, collected identically by the CLI and
/// HTTP adapters. Created fresh per request and discarded afterwards.
#[derive(Debug, Clone)]
pub struct AskParams {
    pub prompt: String,
    pub document_paths: Vec<String>,
    pub chunk_size: usize,
    pub overlap: usize,
    pub k: usize,
    pub chat_model: String,
    pub embeddings_model: String,
}

impl AskParams {
    pub const DEFAULT_CHUNK_SIZE: usize = 500;
    pub const DEFAULT_OVERLAP: usize = 50;
    pub const DEFAULT_K: usize = 5;
    pub const DEFAULT_EMBEDDINGS_MODEL: &'static str = "nomic-embed-text";

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prompt.trim().is_empty() {
            return Err(DomainError::validation("prompt must not be empty"));
        }
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be positive"));
        }
        if self.k == 0 {
            return Err(DomainError::validation("k must be positive"));
        }
        if self.overlap >= self.chunk_size {
            return Err(DomainError::validation(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// A per-request retrieval session, chosen once at build time: either a bare
/// conversational agent, or an agent bound to a freshly ingested knowledge
/// index.
pub enum Session {
    NoRetrieval {
        agent: Arc<dyn ChatService>,
    },
    WithRetrieval {
        agent: Arc<dyn ChatService>,
        index: Arc<KnowledgeIndex>,
    },
}

impl Session {
    pub fn no_retrieval(agent: Arc<dyn ChatService>) -> Self {
        Self::NoRetrieval { agent }
    }

    pub fn with_retrieval(agent: Arc<dyn ChatService>, index: Arc<KnowledgeIndex>) -> Self {
        Self::WithRetrieval { agent, index }
    }

    pub fn has_retrieval(&self) -> bool {
        matches!(self, Self::WithRetrieval { .. })
    }

    /// Runs the one query this session was built for and returns the plain
    /// text answer. Consumes the session: a session serves exactly one ask.
    pub async fn ask(self, prompt: &str) -> Result<String, DomainError> {
        let agent = match &self {
            Session::NoRetrieval { agent } | Session::WithRetrieval { agent, .. } => agent,
        };
        agent.complete(SYSTEM_INSTRUCTIONS, prompt).await
    }
}

/// Builds a ready-to-ask session from request parameters. When the returned
/// future resolves, any document ingestion has fully completed.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn build(&self, params: AskParams) -> Result<Session, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::knowledge::test_support::{MemoryRegistry, StubEmbedding};
    use crate::infrastructure::InMemoryVectorStore;
    use std::io::Write;

    fn params(prompt: &str) -> AskParams {
        AskParams {
            prompt: prompt.to_string(),
            document_paths: Vec::new(),
            chunk_size: AskParams::DEFAULT_CHUNK_SIZE,
            overlap: AskParams::DEFAULT_OVERLAP,
            k: AskParams::DEFAULT_K,
            chat_model: "mistral".to_string(),
            embeddings_model: AskParams::DEFAULT_EMBEDDINGS_MODEL.to_string(),
        }
    }

    #[test]
    fn default_params_validate() {
        assert!(params("What is RAG?").validate().is_ok());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(params("  ").validate().is_err());
    }

    #[test]
    fn overlap_one_below_chunk_size_is_accepted() {
        let mut p = params("q");
        p.chunk_size = 100;
        p.overlap = 99;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn overlap_at_or_above_chunk_size_is_rejected() {
        let mut p = params("q");
        p.chunk_size = 100;
        p.overlap = 100;
        assert!(matches!(
            p.validate().unwrap_err(),
            DomainError::Validation(_)
        ));

        p.overlap = 150;
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_chunk_size_and_zero_k_are_rejected() {
        let mut p = params("q");
        p.chunk_size = 0;
        assert!(p.validate().is_err());

        let mut p = params("q");
        p.k = 0;
        assert!(p.validate().is_err());
    }

    /// Chat stub that answers from the model alone.
    struct EchoChat;

    #[async_trait]
    impl ChatService for EchoChat {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, DomainError> {
            Ok(format!("answer to: {prompt}"))
        }
    }

    /// Chat stub that mimics the retrieval round trip: it searches the index
    /// with the prompt and folds the retrieved chunks into its answer.
    struct RetrievingChat {
        index: Arc<KnowledgeIndex>,
    }

    #[async_trait]
    impl ChatService for RetrievingChat {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, DomainError> {
            let results = self.index.retrieve(prompt).await?;
            let context = results
                .iter()
                .map(|r| r.chunk.content.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            Ok(format!("based on [{context}]: {prompt}"))
        }
    }

    #[tokio::test]
    async fn session_without_retrieval_answers_from_the_model_alone() {
        let session = Session::no_retrieval(Arc::new(EchoChat));
        assert!(!session.has_retrieval());

        let answer = session.ask("What is RAG?").await.unwrap();
        assert_eq!(answer, "answer to: What is RAG?");
    }

    #[tokio::test]
    async fn session_with_retrieval_answers_from_ingested_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"# Glossary\n\nA flurbo is a unit of currency.")
            .unwrap();

        let index = Arc::new(KnowledgeIndex::new(
            Arc::new(StubEmbedding),
            Arc::new(InMemoryVectorStore::new()),
            Arc::new(MemoryRegistry::default()),
            5,
        ));
        let report = index
            .ingest_paths(&[path.to_string_lossy().into_owned()], 500, 50, 4)
            .await
            .unwrap();
        assert_eq!(report.ingested, 1);

        let session = Session::with_retrieval(
            Arc::new(RetrievingChat {
                index: index.clone(),
            }),
            index,
        );
        assert!(session.has_retrieval());

        let answer = session.ask("What is a flurbo?").await.unwrap();
        assert!(answer.contains("flurbo is a unit of currency"));
    }
}
