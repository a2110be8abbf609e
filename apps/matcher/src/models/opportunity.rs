use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

impl Attachment {
    /// PDF detection is by url substring, case-insensitive.
    pub fn is_pdf(&self) -> bool {
        self.url.to_lowercase().contains(".pdf")
    }
}

/// One scraped announcement, as handed over by the source collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Attachment text already decoded upstream, keyed by attachment url.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attachment_texts: HashMap<String, String>,
}

impl OpportunityRecord {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let json = r#"{"title": "Erasmus+ Mobility", "url": "https://uss.rnu.tn/news/1"}"#;
        let record: OpportunityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Erasmus+ Mobility");
        assert!(record.description.is_empty());
        assert!(record.attachments.is_empty());
        assert!(record.attachment_texts.is_empty());
    }

    #[test]
    fn test_attachment_pdf_detection_is_case_insensitive() {
        let pdf = Attachment {
            name: "Call".to_string(),
            url: "https://uss.rnu.tn/files/CALL.PDF".to_string(),
        };
        let doc = Attachment {
            name: "Form".to_string(),
            url: "https://uss.rnu.tn/files/form.docx".to_string(),
        };
        assert!(pdf.is_pdf());
        assert!(!doc.is_pdf());
    }

    #[test]
    fn test_attachment_texts_not_serialized_when_empty() {
        let record = OpportunityRecord {
            title: "Stage".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("attachment_texts"));
    }

    #[test]
    fn test_display_title_falls_back_to_untitled() {
        let record = OpportunityRecord::default();
        assert_eq!(record.display_title(), "Untitled");
    }
}
