use domain::models::IndexedChunk;
use std::cmp::Ordering;

pub struct SearchEngine;

impl SearchEngine {
    /// Normalized dot product. Returns 0.0 when either norm is zero
    /// instead of dividing by it.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot_product / (norm_a * norm_b)
    }

    /// Exhaustive top-k scan over the index. Entries with an empty
    /// embedding are skipped. The sort is stable, so entries with
    /// equal scores keep their index order.
    pub fn retrieve<'a>(
        query_embedding: &[f32],
        indexed: &'a [IndexedChunk],
        top_k: usize,
    ) -> Vec<(&'a IndexedChunk, f32)> {
        let mut scored: Vec<(&IndexedChunk, f32)> = indexed
            .iter()
            .filter(|entry| !entry.embedding.is_empty())
            .map(|entry| {
                (
                    entry,
                    Self::cosine_similarity(query_embedding, &entry.embedding),
                )
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}
