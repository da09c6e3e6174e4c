pub mod chat_service;
pub mod prompt;
pub mod session_store;
