pub mod config;
pub mod document_parser;
pub mod indexer;
pub mod ollama_client;
pub mod qa_parser;
pub mod search;
