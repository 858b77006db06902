use std::path::PathBuf;

/// Process configuration, resolved once at startup. Unset environment
/// variables fall back silently to the fixed defaults below; the value is
/// never mutated afterwards and is passed explicitly to whoever needs it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Qdrant endpoint, `QDRANT_URL`.
    pub qdrant_url: String,
    /// Ollama endpoint serving both chat and embedding models, `OLLAMA_API_URL`.
    pub ollama_url: String,
    /// Chat model used when a request names none.
    pub default_chat_model: String,
    /// Dimensionality of the embedding model output.
    pub embedding_dimension: usize,
    /// Cap on documents ingested per request.
    pub max_documents: usize,
    /// JSON file tracking already-ingested content.
    pub registry_path: PathBuf,
    /// HTTP bind address, `SERVER_HOST` / `SERVER_PORT`.
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            qdrant_url: env_or("QDRANT_URL", defaults.qdrant_url),
            ollama_url: env_or("OLLAMA_API_URL", defaults.ollama_url),
            host: env_or("SERVER_HOST", defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_chat_model: defaults.default_chat_model,
            embedding_dimension: defaults.embedding_dimension,
            max_documents: defaults.max_documents,
            registry_path: defaults.registry_path,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qdrant_url: "http://localhost:6334".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            default_chat_model: "mistral".to_string(),
            embedding_dimension: 768,
            max_documents: 4,
            registry_path: PathBuf::from("tmp/contents_db.json"),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
