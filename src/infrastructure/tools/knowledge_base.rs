use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::application::KnowledgeIndex;

const NO_RESULTS_MESSAGE: &str = "No relevant documents found in the knowledge base.";

#[derive(Debug, thiserror::Error)]
#[error("Knowledge base error: {0}")]
pub struct KnowledgeBaseError(pub String);

#[derive(Debug, Deserialize, Serialize)]
pub struct KnowledgeBaseArgs {
    pub query: String,
}

/// Retrieval tool handed to the agent: embeds the model's query, runs a
/// top-k similarity search, and returns the chunks with source references.
pub struct KnowledgeBaseTool {
    index: Arc<KnowledgeIndex>,
}

impl KnowledgeBaseTool {
    pub fn new(index: Arc<KnowledgeIndex>) -> Self {
        Self { index }
    }
}

impl Tool for KnowledgeBaseTool {
    const NAME: &'static str = "search_knowledge_base";

    type Error = KnowledgeBaseError;
    type Args = KnowledgeBaseArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the knowledge base for document chunks relevant to a query."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let results = self
            .index
            .retrieve(&args.query)
            .await
            .map_err(|e| KnowledgeBaseError(e.to_string()))?;

        let output = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("[{}] (source: {}) {}", i + 1, r.chunk.source, r.chunk.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(if output.is_empty() {
            NO_RESULTS_MESSAGE.to_string()
        } else {
            output
        })
    }
}
