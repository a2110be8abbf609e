use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalyzedOpportunity;

/// An analyzed opportunity scored against a declared profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub opportunity: AnalyzedOpportunity,
    pub match_score: u32,
    /// In evaluation order.
    pub match_reasons: Vec<String>,
}

/// An analyzed opportunity scored against a CV by text similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    #[serde(flatten)]
    pub opportunity: AnalyzedOpportunity,
    /// In [0, 1], comparable only within one backend's run.
    pub similarity_score: f64,
    pub similarity_percentage: f64,
}

impl SimilarityMatch {
    pub fn new(opportunity: AnalyzedOpportunity, similarity_score: f64) -> Self {
        Self {
            opportunity,
            similarity_score,
            similarity_percentage: (similarity_score * 100.0 * 100.0).round() / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractedAttributes, OpportunityRecord};

    #[test]
    fn test_similarity_percentage_rounds_to_two_decimals() {
        let opp = AnalyzedOpportunity::new(&OpportunityRecord::default(), ExtractedAttributes::default());
        let m = SimilarityMatch::new(opp, 0.123456);
        assert!((m.similarity_percentage - 12.35).abs() < 1e-9);
    }

    #[test]
    fn test_scored_match_serializes_flat() {
        let record = OpportunityRecord {
            title: "Bourse de mobilité".to_string(),
            ..Default::default()
        };
        let m = ScoredMatch {
            opportunity: AnalyzedOpportunity::new(&record, ExtractedAttributes::default()),
            match_score: 2,
            match_reasons: vec!["Open to all levels".to_string()],
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["title"], "Bourse de mobilité");
        assert_eq!(value["match_score"], 2);
        assert_eq!(value["match_reasons"][0], "Open to all levels");
        assert_eq!(value["level"][0], "All levels");
    }
}
