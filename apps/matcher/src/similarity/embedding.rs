//! Sentence-embedding backend (all-MiniLM-L6-v2 via fastembed).

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::debug;

use super::{cosine_similarity, SimilarityBackend};
use crate::errors::MatcherError;

pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";

pub struct EmbeddingBackend {
    model: TextEmbedding,
}

impl EmbeddingBackend {
    /// Loads the model, downloading it into the fastembed cache on first use.
    pub fn load() -> Result<Self, MatcherError> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|e| MatcherError::Embedding(e.to_string()))?;
        Ok(Self { model })
    }

    fn encode(&self, texts: Vec<&str>) -> Result<Vec<Vec<f64>>, MatcherError> {
        let embeddings = self
            .model
            .embed(texts, None)
            .map_err(|e| MatcherError::Embedding(e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|v| v.into_iter().map(f64::from).collect())
            .collect())
    }
}

impl SimilarityBackend for EmbeddingBackend {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn rank(&self, query: &str, corpus: &[String]) -> Result<Vec<f64>, MatcherError> {
        if corpus.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self
            .encode(vec![query])?
            .pop()
            .ok_or_else(|| MatcherError::Embedding("no embedding returned for query".into()))?;

        debug!(count = corpus.len(), "Encoding opportunities");
        let corpus_vecs = self.encode(corpus.iter().map(String::as_str).collect())?;

        Ok(corpus_vecs
            .iter()
            .map(|v| cosine_similarity(&query_vec, v))
            .collect())
    }
}
