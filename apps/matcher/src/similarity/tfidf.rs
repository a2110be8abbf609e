//! Lexical TF-IDF backend.
//!
//! The vocabulary is refit on every `rank` call over `[query] + corpus`, so a
//! backend value carries only its settings and never any fitted state.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::is_stop_word;
use super::{cosine_similarity, SimilarityBackend};
use crate::errors::MatcherError;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

pub const DEFAULT_MAX_FEATURES: usize = 500;

#[derive(Debug, Clone)]
pub struct TfIdfBackend {
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths.
    pub ngram_range: (usize, usize),
}

impl Default for TfIdfBackend {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 2),
        }
    }
}

impl TfIdfBackend {
    /// Lowercased tokens with stop words removed, expanded into n-grams.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !is_stop_word(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Term index for the `max_features` most frequent terms across `docs`.
    /// Ties on frequency are broken alphabetically.
    fn fit_vocabulary(&self, docs: &[Vec<String>]) -> HashMap<String, usize> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in docs {
            for term in doc {
                *totals.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();
        kept.into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect()
    }

    /// Smoothed IDF: `ln((1 + n) / (1 + df)) + 1`.
    fn idf(vocabulary: &HashMap<String, usize>, docs: &[Vec<String>]) -> Vec<f64> {
        let mut df = vec![0usize; vocabulary.len()];
        for doc in docs {
            let mut seen = vec![false; vocabulary.len()];
            for term in doc {
                if let Some(&idx) = vocabulary.get(term) {
                    if !seen[idx] {
                        seen[idx] = true;
                        df[idx] += 1;
                    }
                }
            }
        }

        let n = docs.len() as f64;
        df.into_iter()
            .map(|d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect()
    }

    fn vectorize(doc: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> Vec<f64> {
        let mut vector = vec![0.0; vocabulary.len()];
        for term in doc {
            if let Some(&idx) = vocabulary.get(term) {
                vector[idx] += 1.0;
            }
        }
        for (weight, idf) in vector.iter_mut().zip(idf) {
            *weight *= idf;
        }

        let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|w| *w /= norm);
        }
        vector
    }
}

impl SimilarityBackend for TfIdfBackend {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn rank(&self, query: &str, corpus: &[String]) -> Result<Vec<f64>, MatcherError> {
        if corpus.is_empty() {
            return Ok(Vec::new());
        }

        let docs: Vec<Vec<String>> = std::iter::once(query)
            .chain(corpus.iter().map(String::as_str))
            .map(|text| self.analyze(text))
            .collect();

        let vocabulary = self.fit_vocabulary(&docs);
        if vocabulary.is_empty() {
            return Ok(vec![0.0; corpus.len()]);
        }

        let idf = Self::idf(&vocabulary, &docs);
        let query_vec = Self::vectorize(&docs[0], &vocabulary, &idf);

        Ok(docs[1..]
            .iter()
            .map(|doc| cosine_similarity(&query_vec, &Self::vectorize(doc, &vocabulary, &idf)))
            .collect())
    }
}
