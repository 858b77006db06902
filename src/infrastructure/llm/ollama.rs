use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::ollama;
use std::sync::Arc;

use crate::application::KnowledgeIndex;
use crate::domain::{ports::ChatService, DomainError};
use crate::infrastructure::tools::KnowledgeBaseTool;

/// Upper bound on agent turns when the model may call the retrieval tool.
const MAX_TOOL_TURNS: usize = 5;

/// Conversational agent answering from the chat model alone.
pub struct OllamaChat {
    client: ollama::Client,
    model: String,
}

impl OllamaChat {
    pub fn new(client: ollama::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatService for OllamaChat {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, DomainError> {
        let agent = self.client.agent(&self.model).preamble(system).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::external(format!("Agent failed: {e}")))
    }
}

/// Conversational agent with the knowledge-base search tool attached. The
/// model decides when to search; retrieved chunks flow back as tool output.
pub struct OllamaRagChat {
    client: ollama::Client,
    model: String,
    index: Arc<KnowledgeIndex>,
}

impl OllamaRagChat {
    pub fn new(client: ollama::Client, model: impl Into<String>, index: Arc<KnowledgeIndex>) -> Self {
        Self {
            client,
            model: model.into(),
            index,
        }
    }
}

#[async_trait]
impl ChatService for OllamaRagChat {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, DomainError> {
        let tool = KnowledgeBaseTool::new(self.index.clone());
        let agent = self
            .client
            .agent(&self.model)
            .preamble(system)
            .tool(tool)
            .build();

        agent
            .prompt(prompt)
            .multi_turn(MAX_TOOL_TURNS)
            .await
            .map_err(|e| DomainError::external(format!("Agent failed: {e}")))
    }
}
