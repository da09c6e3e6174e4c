use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::indexer::IndexKeySource;

pub struct Config {
    pub system_data_path: String,
    pub question_data_path: String,
    pub ollama_base_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub index_key_source: IndexKeySource,
    pub top_k: usize,
    pub min_score: f32,
    pub generation_timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self {
            system_data_path: env::var("SYSTEM_DATA_PATH")
                .unwrap_or_else(|_| "data/system.md".to_string()),
            question_data_path: env::var("QUESTION_DATA_PATH")
                .unwrap_or_else(|_| "data/questions.md".to_string()),
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            chat_model: env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| "qwen2.5:7b".to_string()),
            embed_model: env::var("OLLAMA_EMBED_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            index_key_source: match env::var("INDEX_KEY_SOURCE").as_deref() {
                Ok("content") => IndexKeySource::Content,
                _ => IndexKeySource::Metadata,
            },
            top_k: env::var("RETRIEVAL_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            min_score: env::var("MIN_SCORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.3),
            generation_timeout: Duration::from_secs(
                env::var("GENERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}
