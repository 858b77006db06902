//! Application layer - Use cases and orchestration.
//!
//! This module contains the services that turn an ask request into a
//! configured retrieval session. Services depend on domain ports (traits)
//! rather than concrete implementations.

pub mod services;

pub use services::{AskParams, IngestReport, KnowledgeIndex, Session, SessionFactory};
