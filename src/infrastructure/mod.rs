pub mod agent;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod registry;
pub mod tools;
pub mod vector_store;

pub use agent::{OllamaSessionFactory, COLLECTION_NAME};
pub use config::AppConfig;
pub use embedding::OllamaEmbedding;
pub use llm::{OllamaChat, OllamaRagChat};
pub use registry::JsonContentRegistry;
pub use tools::KnowledgeBaseTool;
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};
