use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// One round trip to the conversational model. Implementations may run
/// retrieval tool calls internally before the final answer comes back.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, DomainError>;
}
