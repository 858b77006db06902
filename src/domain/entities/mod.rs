mod document;
mod embedding;

pub use document::{chunk_markdown, Document, DocumentChunk, SearchResult};
pub use embedding::Embedding;
