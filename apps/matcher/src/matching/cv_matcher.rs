//! CV-to-opportunity ranking through a `SimilarityBackend`.

use tracing::info;

use crate::errors::MatcherError;
use crate::models::{AnalyzedOpportunity, SimilarityMatch};
use crate::similarity::SimilarityBackend;

/// Text an opportunity is compared on: title, subtitle, description, fields,
/// levels and requirements, space-joined with empty parts skipped.
pub fn opportunity_text(opp: &AnalyzedOpportunity) -> String {
    let attrs = &opp.attributes;
    let fields = attrs
        .fields_of_study
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let levels = attrs
        .level
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let requirements = attrs.requirements.join(" ");

    [
        opp.title.as_str(),
        opp.subtitle.as_str(),
        opp.description.as_str(),
        fields.as_str(),
        levels.as_str(),
        requirements.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Ranks every opportunity by similarity to `cv_text`, highest first.
/// Equal scores keep their input order.
pub fn match_cv(
    cv_text: &str,
    opportunities: Vec<AnalyzedOpportunity>,
    backend: &dyn SimilarityBackend,
) -> Result<Vec<SimilarityMatch>, MatcherError> {
    let corpus: Vec<String> = opportunities.iter().map(opportunity_text).collect();
    let scores = backend.rank(cv_text, &corpus)?;

    let mut matched: Vec<SimilarityMatch> = opportunities
        .into_iter()
        .zip(scores)
        .map(|(opp, score)| SimilarityMatch::new(opp, score))
        .collect();
    matched.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

    info!(
        backend = backend.name(),
        count = matched.len(),
        "Calculated similarity scores"
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcademicLevel, ExtractedAttributes, OpportunityRecord};
    use crate::similarity::TfIdfBackend;

    const CV_TEXT: &str = r#"Jane Doe
Skills: Machine Learning, Python, Data Science
"#;

    fn opportunity(title: &str, fields: &[&str]) -> AnalyzedOpportunity {
        let record = OpportunityRecord {
            title: title.to_string(),
            ..Default::default()
        };
        let attrs = ExtractedAttributes {
            fields_of_study: fields.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        };
        AnalyzedOpportunity::new(&record, attrs)
    }

    /// Returns fixed scores, to check ordering independently of TF-IDF.
    struct FixedScores(Vec<f64>);

    impl SimilarityBackend for FixedScores {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn rank(&self, _query: &str, corpus: &[String]) -> Result<Vec<f64>, MatcherError> {
            assert_eq!(corpus.len(), self.0.len());
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_opportunity_text_skips_empty_parts() {
        let mut opp = opportunity("Bourse Erasmus", &["Computer Science", "Data Science"]);
        opp.attributes.level = vec![AcademicLevel::Master, AcademicLevel::PhD];
        opp.attributes.requirements = vec!["must hold a bachelor degree".to_string()];

        assert_eq!(
            opportunity_text(&opp),
            "Bourse Erasmus Computer Science Data Science Master PhD must hold a bachelor degree"
        );
    }

    #[test]
    fn test_data_science_internship_ranks_first() {
        let opportunities = vec![
            opportunity("Software Engineering Intern", &["Computer Science"]),
            opportunity("Data Science Internship", &["Data Science", "Computer Science"]),
        ];

        let matched = match_cv(CV_TEXT, opportunities, &TfIdfBackend::default()).unwrap();

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].opportunity.title, "Data Science Internship");
        assert!(matched[0].similarity_score > matched[1].similarity_score);
        assert!(matched
            .iter()
            .all(|m| (0.0..=1.0).contains(&m.similarity_score)));
    }

    #[test]
    fn test_ranking_ignores_whitespace_layout() {
        let opportunities = vec![
            opportunity("Software Engineering Intern", &["Computer Science"]),
            opportunity("Data Science Internship", &["Data Science"]),
        ];
        let backend = TfIdfBackend::default();

        let compact = match_cv("python data science", opportunities.clone(), &backend).unwrap();
        let spread = match_cv("  python\n\n data\tscience  ", opportunities, &backend).unwrap();

        let scores = |m: &[SimilarityMatch]| m.iter().map(|x| x.similarity_score).collect::<Vec<_>>();
        assert_eq!(scores(&compact), scores(&spread));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let opportunities = vec![
            opportunity("First", &[]),
            opportunity("Second", &[]),
            opportunity("Third", &[]),
        ];
        let backend = FixedScores(vec![0.5, 0.9, 0.5]);

        let matched = match_cv("cv", opportunities, &backend).unwrap();
        let titles: Vec<&str> = matched.iter().map(|m| m.opportunity.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First", "Third"]);
        assert!((matched[0].similarity_percentage - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_corpus_yields_no_matches() {
        let matched = match_cv(CV_TEXT, vec![], &TfIdfBackend::default()).unwrap();
        assert!(matched.is_empty());
    }
}
