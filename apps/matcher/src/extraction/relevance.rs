use crate::extraction::patterns::RELEVANCE_KEYWORDS;
use crate::models::OpportunityRecord;

/// True iff any relevance keyword occurs in the lower-cased text.
pub fn is_relevant(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    RELEVANCE_KEYWORDS.iter().any(|kw| text_lower.contains(kw))
}

/// Relevance over `description title subtitle`.
pub fn is_relevant_record(record: &OpportunityRecord) -> bool {
    is_relevant(&format!(
        "{} {} {}",
        record.description, record.title, record.subtitle
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str, subtitle: &str) -> OpportunityRecord {
        OpportunityRecord {
            title: title.to_string(),
            description: description.to_string(),
            subtitle: subtitle.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_phd_scholarship_is_relevant() {
        let opp = record(
            "PhD Scholarship in AI",
            "An opportunity for graduate students in computer science.",
            "Fully funded PhD",
        );
        assert!(is_relevant_record(&opp));
    }

    #[test]
    fn test_job_offer_is_not_relevant() {
        let opp = record(
            "Senior Developer Position",
            "A full-time job for experienced developers.",
            "Job offer",
        );
        assert!(!is_relevant_record(&opp));
    }

    #[test]
    fn test_french_keyword_matches_case_insensitively() {
        assert!(is_relevant("Appel à candidatures : BOURSE d'excellence"));
        assert!(is_relevant("Programme de MOBILITÉ internationale"));
    }

    #[test]
    fn test_substring_semantics() {
        // "stage" inside a longer word still counts.
        assert!(is_relevant("Backstage tour"));
        assert!(!is_relevant(""));
    }
}
