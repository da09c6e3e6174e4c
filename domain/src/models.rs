use serde::{Deserialize, Serialize};

/// Retrieval-set entry: the chunk body paired with the vector it is
/// ranked by. The vector is computed from the chunk's index key, not
/// necessarily from `text` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}
