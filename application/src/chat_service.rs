use anyhow::Context;
use domain::models::IndexedChunk;
use domain::session::Message;
use infrastructure::{
    config::Config,
    document_parser::DocumentParser,
    indexer::ChunkIndexer,
    ollama_client::{EmbeddingClient, GenerationClient, OllamaClient},
    qa_parser::QaParser,
    search::SearchEngine,
};
use shared::telemetry::Telemetry;
use shared::types::{ChatError, Result};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::prompt;
use crate::session_store::{trim_history, SessionStore};

/// One chat turn pipeline: embed the query, rank it against the
/// startup-built index, condition the generator on the winners plus
/// recent history, and record both sides of the exchange.
pub struct ChatService {
    embedder: Arc<dyn EmbeddingClient>,
    generator: Arc<dyn GenerationClient>,
    index: Arc<Vec<IndexedChunk>>,
    sessions: SessionStore,
    top_k: usize,
    min_score: f32,
    generation_timeout: Duration,
}

impl ChatService {
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        generator: Arc<dyn GenerationClient>,
        index: Arc<Vec<IndexedChunk>>,
        top_k: usize,
        min_score: f32,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            embedder,
            generator,
            index,
            sessions: SessionStore::new(),
            top_k,
            min_score,
            generation_timeout,
        }
    }

    /// Startup path: parse both knowledge documents and build the
    /// retrieval index. Any failure here is fatal; the caller must not
    /// report the service as ready.
    pub async fn initialize(config: &Config, client: OllamaClient) -> Result<Self> {
        let system_text = fs::read_to_string(&config.system_data_path)
            .with_context(|| format!("reading system data from {}", config.system_data_path))?;
        let question_text = fs::read_to_string(&config.question_data_path)
            .with_context(|| format!("reading question data from {}", config.question_data_path))?;

        let mut chunks = DocumentParser::parse(&system_text);
        chunks.extend(QaParser::parse(&question_text));
        tracing::info!(chunks = chunks.len(), "knowledge base parsed");

        let indexer = ChunkIndexer::new(config.index_key_source);
        let indexed = indexer
            .index(&chunks, &client)
            .await
            .context("building retrieval index")?;
        tracing::info!(entries = indexed.len(), "retrieval index built");

        Ok(Self::new(
            Arc::new(client.clone()),
            Arc::new(client),
            Arc::new(indexed),
            config.top_k,
            config.min_score,
            config.generation_timeout,
        ))
    }

    /// Runs one turn. The session lock is held for the whole turn so
    /// concurrent requests on the same id cannot interleave.
    pub async fn handle_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> std::result::Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::Validation("message must not be empty".into()));
        }

        let telemetry = Telemetry::new();
        let session = self.sessions.get_or_create(session_id);
        let mut history = session.lock().await;
        history.push(Message::user(message));

        let query_embedding = self
            .embedder
            .encode(message)
            .await
            .map_err(|e| ChatError::Upstream(format!("query embedding failed: {e}")))?;

        let ranked = SearchEngine::retrieve(&query_embedding, &self.index, self.top_k);
        let response = match prompt::context_block(&ranked, self.min_score) {
            None => prompt::NO_CONTEXT_FALLBACK.to_string(),
            Some(context) => self.generate(message, &context, &history).await,
        };

        history.push(Message::assistant(&response));
        trim_history(&mut history);
        drop(history);

        tracing::debug!(
            session = session_id,
            elapsed_ms = telemetry.elapsed().as_millis() as u64,
            "chat turn complete"
        );
        Ok(response)
    }

    /// Generation never fails the request: errors and timeouts both
    /// degrade to an apology string.
    async fn generate(&self, query: &str, context: &str, history: &[Message]) -> String {
        let prompt = prompt::build_prompt(query, context, history);
        match timeout(self.generation_timeout, self.generator.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "generation call failed");
                format!("Sorry, an error occurred: {e}")
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.generation_timeout.as_secs(),
                    "generation call timed out"
                );
                "Sorry, an error occurred: the model took too long to respond.".to_string()
            }
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn index_size(&self) -> usize {
        self.index.len()
    }
}
