use clap::Parser;
use std::sync::Arc;

use crate::application::{AskParams, SessionFactory};
use crate::infrastructure::{AppConfig, OllamaSessionFactory};

/// RAG assistant CLI: prompt and document paths.
#[derive(Parser, Debug)]
#[command(name = "rag-assistant", about = "RAG assistant CLI: prompt and document paths")]
pub struct Cli {
    /// Question or prompt to ask the assistant (wrap in quotes if it contains spaces)
    pub prompt: String,

    /// One or more paths to markdown documents to ingest
    #[arg(long = "document-paths", num_args = 1..)]
    pub document_paths: Vec<String>,

    /// Size of document chunks to create
    #[arg(long, default_value_t = AskParams::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Number of overlapping characters between chunks
    #[arg(long, default_value_t = AskParams::DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Number of top relevant documents to retrieve
    #[arg(long, default_value_t = AskParams::DEFAULT_K)]
    pub k: usize,

    /// Chat model to use from Ollama (defaults to the configured model)
    #[arg(long)]
    pub chat_model: Option<String>,

    /// Embeddings model to use from Ollama
    #[arg(long, default_value = AskParams::DEFAULT_EMBEDDINGS_MODEL)]
    pub embeddings_model: String,
}

impl Cli {
    fn into_params(self, default_chat_model: &str) -> AskParams {
        AskParams {
            prompt: self.prompt,
            document_paths: self.document_paths,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            k: self.k,
            chat_model: self
                .chat_model
                .unwrap_or_else(|| default_chat_model.to_string()),
            embeddings_model: self.embeddings_model,
        }
    }
}

/// Runs one ask request from the process arguments and prints the answer.
pub async fn run(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let cli = Cli::parse();
    let params = cli.into_params(&config.default_chat_model);
    let prompt = params.prompt.clone();

    let factory = OllamaSessionFactory::new(config);
    let session = factory.build(params).await?;
    let answer = session.ask(&prompt).await?;

    println!("{answer}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prompt_and_flags() {
        let cli = Cli::try_parse_from([
            "rag-assistant",
            "Summarize doc.md",
            "--document-paths",
            "doc.md",
            "notes.md",
            "--chunk-size",
            "300",
            "--overlap",
            "30",
            "--k",
            "3",
            "--chat-model",
            "llama3",
            "--embeddings-model",
            "all-minilm",
        ])
        .unwrap();

        assert_eq!(cli.prompt, "Summarize doc.md");
        assert_eq!(cli.document_paths, vec!["doc.md", "notes.md"]);
        assert_eq!(cli.chunk_size, 300);
        assert_eq!(cli.overlap, 30);
        assert_eq!(cli.k, 3);
        assert_eq!(cli.chat_model.as_deref(), Some("llama3"));
        assert_eq!(cli.embeddings_model, "all-minilm");
    }

    #[test]
    fn flags_default_like_the_http_adapter() {
        let cli = Cli::try_parse_from(["rag-assistant", "What is RAG?"]).unwrap();

        assert!(cli.document_paths.is_empty());
        assert_eq!(cli.chunk_size, 500);
        assert_eq!(cli.overlap, 50);
        assert_eq!(cli.k, 5);
        assert!(cli.chat_model.is_none());
        assert_eq!(cli.embeddings_model, "nomic-embed-text");

        let params = cli.into_params("mistral");
        assert_eq!(params.chat_model, "mistral");
    }

    #[test]
    fn missing_prompt_is_a_usage_error() {
        assert!(Cli::try_parse_from(["rag-assistant"]).is_err());
    }
}
