use application::chat_service::ChatService;
use application::prompt::NO_CONTEXT_FALLBACK;
use domain::models::IndexedChunk;
use infrastructure::document_parser::DocumentParser;
use infrastructure::indexer::{ChunkIndexer, IndexKeySource};
use infrastructure::ollama_client::{EmbeddingClient, GenerationClient};
use infrastructure::qa_parser::QaParser;
use infrastructure::search::SearchEngine;
use shared::types::ChatError;
use std::sync::Arc;
use std::time::Duration;
use tests::{FailingGenerator, FixedEmbedder, LetterFrequencyEmbedder, RecordingGenerator};

fn service(
    embedder: impl EmbeddingClient + 'static,
    generator: impl GenerationClient + 'static,
    index: Vec<IndexedChunk>,
) -> ChatService {
    ChatService::new(
        Arc::new(embedder),
        Arc::new(generator),
        Arc::new(index),
        5,
        0.3,
        Duration::from_secs(5),
    )
}

fn entry(text: &str, embedding: Vec<f32>) -> IndexedChunk {
    IndexedChunk {
        text: text.to_string(),
        embedding,
    }
}

#[tokio::test]
async fn below_threshold_query_returns_fallback_without_generating() {
    let generator = Arc::new(RecordingGenerator::new("should never be used"));
    let svc = ChatService::new(
        Arc::new(FixedEmbedder(vec![0.0, 1.0])),
        generator.clone(),
        Arc::new(vec![entry("some passage", vec![1.0, 0.0])]),
        5,
        0.3,
        Duration::from_secs(5),
    );

    let response = svc.handle_message("s1", "unrelated question").await.unwrap();
    assert_eq!(response, NO_CONTEXT_FALLBACK);
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn relevant_context_reaches_the_generator() {
    let generator = Arc::new(RecordingGenerator::new("Here is how."));
    let svc = ChatService::new(
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
        generator.clone(),
        Arc::new(vec![entry("press the save button", vec![1.0, 0.0])]),
        5,
        0.3,
        Duration::from_secs(5),
    );

    let response = svc.handle_message("s1", "how do I save?").await.unwrap();
    assert_eq!(response, "Here is how.");

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("[Score: 1.00] press the save button"));
    assert!(prompts[0].contains("### Current Question:\nhow do I save?"));
    assert!(prompts[0].contains("User: how do I save?"));
}

#[tokio::test]
async fn generation_failure_degrades_to_apology() {
    let svc = service(
        FixedEmbedder(vec![1.0, 0.0]),
        FailingGenerator,
        vec![entry("passage", vec![1.0, 0.0])],
    );

    let response = svc.handle_message("s1", "question").await.unwrap();
    assert!(response.starts_with("Sorry, an error occurred"));
    assert!(response.contains("model unavailable"));

    // The failed turn is still recorded on both sides.
    let history = svc.sessions().history("s1").await;
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn blank_message_is_rejected_before_retrieval() {
    let svc = service(
        FixedEmbedder(vec![1.0]),
        RecordingGenerator::new("unused"),
        vec![entry("passage", vec![1.0])],
    );

    let err = svc.handle_message("s1", "   ").await.unwrap_err();
    assert!(matches!(err, ChatError::Validation(_)));
    assert!(svc.sessions().history("s1").await.is_empty());
}

#[tokio::test]
async fn long_conversations_are_capped_at_twenty_messages() {
    let svc = service(
        FixedEmbedder(vec![0.0, 1.0]),
        RecordingGenerator::new("unused"),
        vec![entry("passage", vec![1.0, 0.0])],
    );

    // 13 turns = 26 messages appended over time.
    for i in 0..13 {
        svc.handle_message("s1", &format!("question {i}")).await.unwrap();
    }

    let history = svc.sessions().history("s1").await;
    assert_eq!(history.len(), 20);
    // Oldest retained message is the user side of turn 3.
    assert_eq!(history[0].content, "question 3");
    assert_eq!(history[19].content, NO_CONTEXT_FALLBACK);
}

#[tokio::test]
async fn parsed_documents_rank_by_heading_similarity() {
    let system_doc = "## Account Management\n### Password Reset\nOpen settings and choose reset.\n### Data Export\nUse the export table.";
    let qa_doc = "### FAQ\n**Q: How do I change my password?**\nA: From the account page.";

    let mut chunks = DocumentParser::parse(system_doc);
    chunks.extend(QaParser::parse(qa_doc));

    let embedder = LetterFrequencyEmbedder;
    let indexer = ChunkIndexer::new(IndexKeySource::Metadata);
    let indexed = indexer.index(&chunks, &embedder).await.unwrap();
    assert_eq!(indexed.len(), chunks.len());

    let query = embedder.encode("password reset").await.unwrap();
    let ranked = SearchEngine::retrieve(&query, &indexed, 1);
    assert_eq!(ranked.len(), 1);
    // The winning entry carries the chunk body, while its ranking came
    // from the heading-derived key.
    assert!(ranked[0].0.text.contains("Open settings"));
}
