use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub source: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(source: impl Into<String>, content_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content_hash: content_hash.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub source: String,
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(
        document_id: Uuid,
        source: impl Into<String>,
        content: impl Into<String>,
        chunk_index: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            source: source.into(),
            content: content.into(),
            chunk_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Splits markdown content into chunks of roughly `chunk_size` characters.
///
/// Blocks are separated by blank lines. Blocks are joined until the next one
/// would exceed `chunk_size`; a heading always closes the current chunk so a
/// section never straddles a boundary mid-heading. On a size split the last
/// `overlap` characters of the closed chunk are carried into the next one.
/// A single block larger than `chunk_size` is kept whole.
pub fn chunk_markdown(
    doc: &Document,
    content: &str,
    chunk_size: usize,
    overlap: usize,
) -> Vec<DocumentChunk> {
    let blocks = content.split("\n\n").map(str::trim).filter(|b| !b.is_empty());

    let mut chunks: Vec<DocumentChunk> = Vec::new();
    let mut current = String::new();

    for block in blocks {
        let heading = block.starts_with('#');
        let full = !current.is_empty() && current.len() + block.len() + 2 > chunk_size;

        if full || (heading && !current.is_empty()) {
            let carry = if full && !heading {
                tail_chars(&current, overlap)
            } else {
                String::new()
            };
            let index = chunks.len();
            chunks.push(DocumentChunk::new(
                doc.id,
                &doc.source,
                std::mem::take(&mut current),
                index,
            ));
            current = carry;
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(block);
    }

    if !current.is_empty() {
        let index = chunks.len();
        chunks.push(DocumentChunk::new(doc.id, &doc.source, current, index));
    }

    chunks
}

/// Last `count` characters of `text`, respecting char boundaries.
fn tail_chars(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    let start = text
        .char_indices()
        .rev()
        .nth(count - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    text[start..].to_string()
}
