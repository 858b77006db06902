mod knowledge;
mod session;

#[cfg(test)]
pub(crate) use knowledge::test_support;

pub use knowledge::{IngestReport, KnowledgeIndex};
pub use session::{AskParams, Session, SessionFactory, SYSTEM_INSTRUCTIONS};
