//! Batch flow over scraped records: relevance filter, attachment decoding,
//! attribute extraction.
//!
//! Records are processed one at a time in input order. Extraction itself runs
//! on a blocking worker so a panic in one record is contained to that record.

use tracing::{debug, error, info, warn};

use crate::decoder::DocumentDecoder;
use crate::errors::MatcherError;
use crate::extraction::{extract, is_relevant_record};
use crate::models::{AnalyzedOpportunity, ExtractedAttributes, OpportunityRecord, PdfAnalysis};

/// Result of `analyze_all`. `failed` counts records skipped after an
/// extraction error; `analyzed.len() + failed == attempted`.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub analyzed: Vec<AnalyzedOpportunity>,
    pub attempted: usize,
    pub failed: usize,
}

/// Keeps the records aimed at students, in input order.
pub fn filter_relevant(records: Vec<OpportunityRecord>) -> Vec<OpportunityRecord> {
    let total = records.len();
    let kept: Vec<OpportunityRecord> = records.into_iter().filter(is_relevant_record).collect();
    info!(kept = kept.len(), total, "Filtered student opportunities");
    kept
}

/// `description\ntitle\nsubtitle\n`, then `\n<text>` for every PDF attachment
/// that decoded to non-empty text. Pre-decoded texts on the record are used
/// instead of the decoder when present.
pub async fn combined_text(
    record: &OpportunityRecord,
    decoder: &dyn DocumentDecoder,
) -> (String, Vec<PdfAnalysis>) {
    let mut text = format!(
        "{}\n{}\n{}\n",
        record.description, record.title, record.subtitle
    );
    let mut pdf_analysis = Vec::new();

    for attachment in record.attachments.iter().filter(|a| a.is_pdf()) {
        let pdf_text = match record.attachment_texts.get(&attachment.url) {
            Some(known) => known.clone(),
            None => {
                debug!(name = %attachment.name, url = %attachment.url, "Analyzing attachment");
                decoder.decode(&attachment.url).await.into_text()
            }
        };

        if pdf_text.is_empty() {
            continue;
        }

        let text_length = pdf_text.chars().count();
        info!(name = %attachment.name, chars = text_length, "Extracted attachment text");
        pdf_analysis.push(PdfAnalysis {
            name: attachment.name.clone(),
            url: attachment.url.clone(),
            text_length,
        });
        text.push('\n');
        text.push_str(&pdf_text);
    }

    (text, pdf_analysis)
}

/// Builds the combined text for one record and extracts its attributes.
pub async fn analyze_opportunity(
    record: &OpportunityRecord,
    decoder: &dyn DocumentDecoder,
) -> Result<AnalyzedOpportunity, MatcherError> {
    let title = record.display_title().to_string();
    debug!(title = %title, url = %record.url, "Analyzing opportunity");

    let (text, pdf_analysis) = combined_text(record, decoder).await;
    let mut attributes = extract_blocking(&title, text, extract).await?;
    attributes.pdf_analysis = pdf_analysis;

    info!(
        title = %title,
        fields = attributes.fields_of_study.len(),
        level = ?attributes.level,
        duration = %attributes.duration,
        period = %attributes.period,
        "Analyzed opportunity"
    );
    Ok(AnalyzedOpportunity::new(record, attributes))
}

/// Analyzes every record in order. A record whose extraction fails is logged
/// and skipped; the batch always runs to the end.
pub async fn analyze_all(
    records: &[OpportunityRecord],
    decoder: &dyn DocumentDecoder,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        attempted: records.len(),
        ..Default::default()
    };

    for (i, record) in records.iter().enumerate() {
        debug!(index = i + 1, total = records.len(), "Processing record");
        match analyze_opportunity(record, decoder).await {
            Ok(analyzed) => outcome.analyzed.push(analyzed),
            Err(e) => {
                error!(
                    title = %record.display_title(),
                    url = %record.url,
                    error = %e,
                    "Error analyzing opportunity"
                );
                outcome.failed += 1;
            }
        }
    }

    if outcome.failed > 0 {
        warn!(failed = outcome.failed, "Some opportunities could not be analyzed");
    }
    info!(
        analyzed = outcome.analyzed.len(),
        attempted = outcome.attempted,
        "Analysis complete"
    );
    outcome
}

async fn extract_blocking<F>(
    title: &str,
    text: String,
    extractor: F,
) -> Result<ExtractedAttributes, MatcherError>
where
    F: FnOnce(&str) -> ExtractedAttributes + Send + 'static,
{
    tokio::task::spawn_blocking(move || extractor(&text))
        .await
        .map_err(|e| MatcherError::Extraction {
            title: title.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::decoder::DecodeOutcome;
    use crate::models::{AcademicLevel, Attachment};

    const BROCHURE_TEXT: &str = r#"Programme de mobilité internationale
Durée: 6 mois
Date limite: 15/03/2025
Eligibility: open to master students enrolled in engineering
"#;

    /// Serves canned outcomes by url and counts decode calls.
    #[derive(Default)]
    struct StubDecoder {
        outcomes: HashMap<String, DecodeOutcome>,
        calls: AtomicUsize,
    }

    impl StubDecoder {
        fn with(mut self, url: &str, outcome: DecodeOutcome) -> Self {
            self.outcomes.insert(url.to_string(), outcome);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentDecoder for StubDecoder {
        async fn decode(&self, location: &str) -> DecodeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .get(location)
                .cloned()
                .unwrap_or_else(|| DecodeOutcome::Unavailable("404".to_string()))
        }
    }

    fn attachment(name: &str, url: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn record(title: &str, description: &str) -> OpportunityRecord {
        OpportunityRecord {
            url: format!("https://example.org/{}", title.to_lowercase().replace(' ', "-")),
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_relevant_keeps_input_order() {
        let records = vec![
            record("Bourse Master", "Pour les étudiants"),
            record("Conference Announcement", "Keynote speakers announced"),
            record("Erasmus Exchange", "Mobility for staff"),
        ];

        let kept = filter_relevant(records);
        let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Bourse Master", "Erasmus Exchange"]);
    }

    #[tokio::test]
    async fn test_combined_text_without_attachments() {
        let mut rec = record("PhD Call", "Funded position");
        rec.subtitle = "Deadline soon".to_string();

        let (text, pdfs) = combined_text(&rec, &StubDecoder::default()).await;
        assert_eq!(text, "Funded position\nPhD Call\nDeadline soon\n");
        assert!(pdfs.is_empty());
    }

    #[tokio::test]
    async fn test_combined_text_appends_decoded_pdfs_only() {
        let mut rec = record("Mobility", "Call for students");
        rec.attachments = vec![
            attachment("Brochure", "https://example.org/files/Brochure.PDF"),
            attachment("Form", "https://example.org/files/form.docx"),
        ];
        let decoder = StubDecoder::default()
            .with(
                "https://example.org/files/Brochure.PDF",
                DecodeOutcome::Text("Durée: 6 mois".to_string()),
            )
            .with(
                "https://example.org/files/form.docx",
                DecodeOutcome::Text("never read".to_string()),
            );

        let (text, pdfs) = combined_text(&rec, &decoder).await;

        assert_eq!(text, "Call for students\nMobility\n\n\nDurée: 6 mois");
        assert_eq!(decoder.calls(), 1);
        assert_eq!(pdfs.len(), 1);
        assert_eq!(pdfs[0].name, "Brochure");
        assert_eq!(pdfs[0].text_length, "Durée: 6 mois".chars().count());
    }

    #[tokio::test]
    async fn test_unavailable_or_empty_pdf_is_not_recorded() {
        let mut rec = record("Mobility", "Call for students");
        rec.attachments = vec![
            attachment("Broken", "https://example.org/broken.pdf"),
            attachment("Scanned", "https://example.org/scanned.pdf"),
        ];
        let decoder = StubDecoder::default()
            .with("https://example.org/scanned.pdf", DecodeOutcome::Text(String::new()));

        let (text, pdfs) = combined_text(&rec, &decoder).await;

        assert_eq!(text, "Call for students\nMobility\n\n");
        assert!(pdfs.is_empty());
        assert_eq!(decoder.calls(), 2);
    }

    #[tokio::test]
    async fn test_pre_decoded_text_skips_decoder() {
        let mut rec = record("Mobility", "Call for students");
        rec.attachments = vec![attachment("Brochure", "https://example.org/b.pdf")];
        rec.attachment_texts
            .insert("https://example.org/b.pdf".to_string(), BROCHURE_TEXT.to_string());
        let decoder = StubDecoder::default();

        let (text, pdfs) = combined_text(&rec, &decoder).await;

        assert!(text.ends_with(BROCHURE_TEXT));
        assert_eq!(pdfs.len(), 1);
        assert_eq!(decoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_opportunity_uses_attachment_text() {
        let mut rec = record("Programme Erasmus+", "Appel à candidatures");
        rec.attachments = vec![attachment("Brochure", "https://example.org/b.pdf")];
        let decoder = StubDecoder::default().with(
            "https://example.org/b.pdf",
            DecodeOutcome::Text(BROCHURE_TEXT.to_string()),
        );

        let analyzed = analyze_opportunity(&rec, &decoder).await.unwrap();

        assert_eq!(analyzed.title, "Programme Erasmus+");
        assert_eq!(analyzed.attributes.duration, "6 mois");
        assert_eq!(analyzed.attributes.period, "Date limite: 15/03/2025");
        assert!(analyzed.attributes.level.contains(&AcademicLevel::Master));
        assert!(analyzed.attributes.fields_of_study.contains("Engineering"));
        assert_eq!(analyzed.attributes.pdf_analysis.len(), 1);
        assert_eq!(analyzed.attachments, rec.attachments);
    }

    #[tokio::test]
    async fn test_analyze_all_counts_every_record() {
        let records = vec![
            record("PhD Scholarship", "Doctoral funding in physics"),
            record("Bachelor Exchange", "Licence students, 1 semester"),
        ];

        let outcome = analyze_all(&records, &StubDecoder::default()).await;

        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.analyzed.len(), 2);
        assert_eq!(outcome.analyzed[0].title, "PhD Scholarship");
        assert_eq!(outcome.analyzed[0].attributes.level, vec![AcademicLevel::PhD]);
    }

    #[tokio::test]
    async fn test_extraction_panic_becomes_extraction_error() {
        let result = extract_blocking("Broken Record", String::new(), |_| {
            panic!("malformed input")
        })
        .await;

        match result {
            Err(MatcherError::Extraction { title, .. }) => assert_eq!(title, "Broken Record"),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }
}
