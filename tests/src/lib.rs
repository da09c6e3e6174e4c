//! Stub collaborators shared by the integration tests.

use async_trait::async_trait;
use infrastructure::ollama_client::{EmbeddingClient, GenerationClient};
use shared::types::Result;
use std::sync::Mutex;

/// Embeds text as lowercase letter frequencies, so cosine similarity
/// actually tracks textual overlap and stays deterministic.
pub struct LetterFrequencyEmbedder;

#[async_trait]
impl EmbeddingClient for LetterFrequencyEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut counts = vec![0.0_f32; 26];
        for c in text.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                counts[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        Ok(counts)
    }
}

/// Always returns the same vector, whatever the input.
pub struct FixedEmbedder(pub Vec<f32>);

#[async_trait]
impl EmbeddingClient for FixedEmbedder {
    async fn encode(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

/// Returns a canned reply and records every prompt it was given.
pub struct RecordingGenerator {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerationClient for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call.
pub struct FailingGenerator;

#[async_trait]
impl GenerationClient for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow::anyhow!("model unavailable"))
    }
}
