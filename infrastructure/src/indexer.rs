use anyhow::Context;
use domain::chunk::{Chunk, ChunkMetadata};
use domain::models::IndexedChunk;
use futures::stream::{self, StreamExt};
use shared::types::Result;

use crate::ollama_client::EmbeddingClient;

/// Which text the index key (and therefore the ranking) is computed
/// from. `Metadata` is the historical behavior: chunks are ranked by
/// their heading/title, not their body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKeySource {
    Metadata,
    Content,
}

/// Absent fields render as the literal `None`.
fn metadata_key(metadata: &ChunkMetadata) -> String {
    let header = metadata.header.as_deref().unwrap_or("None");
    let title = metadata.title.as_deref().unwrap_or("None");
    format!("{header}{title}")
}

pub struct ChunkIndexer {
    key_source: IndexKeySource,
}

impl ChunkIndexer {
    pub fn new(key_source: IndexKeySource) -> Self {
        Self { key_source }
    }

    pub fn key_for(&self, chunk: &Chunk) -> String {
        match self.key_source {
            IndexKeySource::Metadata => metadata_key(&chunk.metadata),
            IndexKeySource::Content => chunk.content.clone(),
        }
    }

    /// Builds the retrieval set. Embedding calls run with bounded
    /// concurrency but results stay in chunk order, which downstream
    /// tie-breaking depends on. Any failed call aborts the build.
    pub async fn index(
        &self,
        chunks: &[Chunk],
        embedder: &dyn EmbeddingClient,
    ) -> Result<Vec<IndexedChunk>> {
        const CONCURRENCY: usize = 8;

        tracing::debug!(chunks = chunks.len(), "generating embeddings");
        let keys: Vec<String> = chunks.iter().map(|c| self.key_for(c)).collect();
        let embeddings: Vec<Result<Vec<f32>>> = stream::iter(keys.iter())
            .map(|key| async move { embedder.encode(key).await })
            .buffered(CONCURRENCY)
            .collect()
            .await;

        let mut indexed = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            let embedding = embedding.with_context(|| {
                format!("embedding failed for chunk {:?}", chunk.metadata.title)
            })?;
            indexed.push(IndexedChunk {
                text: chunk.content.clone(),
                embedding,
            });
        }
        Ok(indexed)
    }
}
