//! Similarity ranking: pluggable backends that score a query text against a
//! corpus.
//!
//! Default: `TfIdfBackend` (pure-Rust lexical vector space, always available).
//! Optional: `EmbeddingBackend` (sentence embeddings, `embeddings` feature).
//!
//! The backend is picked once per run by `select_backend` and never switched
//! per call. Scores are in [0, 1] but only comparable within one backend.

#[cfg(feature = "embeddings")]
pub mod embedding;
pub mod stopwords;
pub mod tfidf;

use tracing::{info, warn};

use crate::errors::MatcherError;

#[cfg(feature = "embeddings")]
pub use embedding::EmbeddingBackend;
pub use tfidf::TfIdfBackend;

/// Scores `query` against every corpus entry, one score per entry in order.
pub trait SimilarityBackend {
    /// "tfidf" | "embedding", for logs and reports.
    fn name(&self) -> &'static str;

    fn rank(&self, query: &str, corpus: &[String]) -> Result<Vec<f64>, MatcherError>;
}

/// Picks the backend for this run.
///
/// Embeddings are used when requested and available (feature compiled in and
/// model loaded). Anything else falls back to TF-IDF with a warning.
pub fn select_backend(prefer_embeddings: bool) -> Box<dyn SimilarityBackend> {
    if !prefer_embeddings {
        info!("Using TF-IDF for keyword-based matching");
        return Box::new(TfIdfBackend::default());
    }

    #[cfg(feature = "embeddings")]
    {
        match EmbeddingBackend::load() {
            Ok(backend) => {
                info!(model = embedding::MODEL_NAME, "Loaded sentence embedding model");
                return Box::new(backend);
            }
            Err(e) => warn!(error = %e, "Embedding model unavailable; falling back to TF-IDF"),
        }
    }

    #[cfg(not(feature = "embeddings"))]
    warn!("Built without the `embeddings` feature; falling back to TF-IDF");

    Box::new(TfIdfBackend::default())
}

/// Cosine similarity clamped to [0, 1]. Zero vectors and dimension
/// mismatches score 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 0.0], &[1.0, 2.0, 0.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_opposite_vectors_clamped_to_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_disabled_embeddings_select_tfidf() {
        assert_eq!(select_backend(false).name(), "tfidf");
    }

    #[cfg(not(feature = "embeddings"))]
    #[test]
    fn test_missing_feature_falls_back_to_tfidf() {
        assert_eq!(select_backend(true).name(), "tfidf");
    }
}
