use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::opportunity::{Attachment, OpportunityRecord};

/// Placeholder returned when no duration or period pattern matches.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Academic level an opportunity targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AcademicLevel {
    Bachelor,
    Master,
    #[serde(rename = "PhD")]
    PhD,
    /// Only used when no specific level keyword matched.
    #[serde(rename = "All levels")]
    AllLevels,
}

impl AcademicLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicLevel::Bachelor => "Bachelor",
            AcademicLevel::Master => "Master",
            AcademicLevel::PhD => "PhD",
            AcademicLevel::AllLevels => "All levels",
        }
    }
}

/// A PDF attachment whose text made it into the combined text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfAnalysis {
    pub name: String,
    pub url: String,
    /// Decoded character count.
    pub text_length: usize,
}

/// Structured attributes pulled out of an opportunity's combined text.
///
/// `level` is never empty and `requirements` holds at most ten entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedAttributes {
    pub fields_of_study: BTreeSet<String>,
    pub duration: String,
    pub period: String,
    pub level: Vec<AcademicLevel>,
    pub requirements: Vec<String>,
    pub pdf_analysis: Vec<PdfAnalysis>,
}

impl Default for ExtractedAttributes {
    fn default() -> Self {
        Self {
            fields_of_study: BTreeSet::new(),
            duration: NOT_SPECIFIED.to_string(),
            period: NOT_SPECIFIED.to_string(),
            level: vec![AcademicLevel::AllLevels],
            requirements: vec![],
            pdf_analysis: vec![],
        }
    }
}

impl ExtractedAttributes {
    pub fn is_open_to_all_levels(&self) -> bool {
        self.level == [AcademicLevel::AllLevels]
    }

    pub fn has_level(&self, level: &str) -> bool {
        self.level.iter().any(|l| l.as_str() == level)
    }
}

/// An opportunity enriched with its extracted attributes. This is the shape
/// written to `analyzed_opportunities.json` and read back by the CV matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedOpportunity {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub attributes: ExtractedAttributes,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl AnalyzedOpportunity {
    pub fn new(record: &OpportunityRecord, attributes: ExtractedAttributes) -> Self {
        Self {
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            attributes,
            attachments: record.attachments.clone(),
        }
    }
}
