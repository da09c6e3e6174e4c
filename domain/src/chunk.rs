use serde::{Deserialize, Serialize};

/// Hierarchical context a chunk was cut out of. Every field is
/// optional: system-document chunks fill header/section/feature,
/// Q&A chunks only carry header and title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub header: Option<String>,
    pub section: Option<String>,
    pub feature: Option<String>,
    pub title: Option<String>,
}

/// A contiguous passage of source text plus the metadata captured at
/// the moment it was flushed out of the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}
