use domain::session::Message;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Hard cap on retained messages per session.
pub const MAX_HISTORY: usize = 20;

pub type SessionHandle = Arc<AsyncMutex<Vec<Message>>>;

/// Drops the oldest messages once the history exceeds the cap,
/// preserving relative order of the survivors.
pub fn trim_history(messages: &mut Vec<Message>) {
    if messages.len() > MAX_HISTORY {
        let excess = messages.len() - MAX_HISTORY;
        messages.drain(..excess);
    }
}

/// Conversation histories keyed by session id. Sessions are created
/// lazily and live for the rest of the process. Each session carries
/// its own async lock; callers that need a whole turn to be atomic
/// hold that lock across the turn, so concurrent requests on the same
/// id cannot interleave appends and trims.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        sessions.entry(id.to_string()).or_default().clone()
    }

    /// Appends without truncating; `trim` is a separate step.
    pub async fn append(&self, id: &str, message: Message) {
        let handle = self.get_or_create(id);
        let mut messages = handle.lock().await;
        messages.push(message);
    }

    pub async fn trim(&self, id: &str) {
        let handle = self.get_or_create(id);
        let mut messages = handle.lock().await;
        trim_history(&mut messages);
    }

    pub async fn history(&self, id: &str) -> Vec<Message> {
        let handle = self.get_or_create(id);
        let messages = handle.lock().await;
        messages.clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }
}
