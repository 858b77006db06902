mod chat;
mod content_registry;
mod embedding;
mod vector_store;

pub use chat::ChatService;
pub use content_registry::ContentRegistry;
pub use embedding::EmbeddingService;
pub use vector_store::VectorStore;
