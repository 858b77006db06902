//! Thin orchestration layer wiring a prompt, markdown documents, and tuning
//! parameters into a retrieval-augmented agent, exposed through a CLI entry
//! point and a single HTTP endpoint. Embeddings, vector search, and chat
//! completion are delegated to external Ollama and Qdrant services.

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
