use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

/// Request-path error taxonomy. Startup code uses plain `anyhow`
/// (failures there are fatal); per-request failures are typed so the
/// transport can map each variant to a distinct response instead of a
/// blanket server error.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("service not ready: {0}")]
    NotReady(String),
    #[error("upstream model call failed: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Internal(err.to_string())
    }
}
