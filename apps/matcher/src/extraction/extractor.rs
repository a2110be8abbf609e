//! Attribute extraction over combined opportunity text.
//!
//! The five sub-extractions are independent and always all run. Duration and
//! period are first-match-wins over ordered pattern tables; a generic labeled
//! clause only wins when no earlier, shorter numeric pattern matched.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;

use crate::extraction::patterns::{
    DURATION_PATTERNS, FIELD_KEYWORDS, FIELD_PATTERNS, LEVEL_KEYWORDS, MAX_REQUIREMENTS,
    MIN_REQUIREMENT_CHARS, PERIOD_PATTERNS, REQUIREMENT_PATTERNS,
};
use crate::models::{AcademicLevel, ExtractedAttributes, NOT_SPECIFIED};

/// Runs every sub-extraction over `text`. `pdf_analysis` is left empty;
/// the pipeline fills it from the attachments it decoded.
pub fn extract(text: &str) -> ExtractedAttributes {
    ExtractedAttributes {
        fields_of_study: extract_fields_of_study(text),
        duration: extract_duration(text),
        period: extract_period(text),
        level: extract_level(text),
        requirements: extract_requirements(text),
        pdf_analysis: vec![],
    }
}

/// Vocabulary hits (title-cased) unioned with lead-in phrase captures (verbatim).
pub fn extract_fields_of_study(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    let mut fields: BTreeSet<String> = FIELD_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .map(|kw| title_case(kw))
        .collect();

    for pattern in FIELD_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(group) = caps.get(1) else { continue };
            let field = group.as_str().trim();
            let len = field.chars().count();
            if len > 3 && len < 50 {
                fields.insert(field.to_string());
            }
        }
    }

    fields
}

pub fn extract_duration(text: &str) -> String {
    first_match(&DURATION_PATTERNS, text).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

pub fn extract_period(text: &str) -> String {
    first_match(&PERIOD_PATTERNS, text).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Every level group with a keyword hit, in table order; `["All levels"]` if none.
pub fn extract_level(text: &str) -> Vec<AcademicLevel> {
    let text_lower = text.to_lowercase();
    let levels: Vec<AcademicLevel> = LEVEL_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text_lower.contains(kw)))
        .map(|(level, _)| *level)
        .collect();

    if levels.is_empty() {
        vec![AcademicLevel::AllLevels]
    } else {
        levels
    }
}

/// Labeled requirement clauses in pattern-then-occurrence order, deduplicated
/// case-insensitively, longer than 15 characters, at most ten.
pub fn extract_requirements(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut requirements = Vec::new();

    for pattern in REQUIREMENT_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let req = m.as_str().trim();
            if req.chars().count() > MIN_REQUIREMENT_CHARS && seen.insert(req.to_lowercase()) {
                requirements.push(req.to_string());
            }
        }
    }

    requirements.truncate(MAX_REQUIREMENTS);
    requirements
}

/// Full span of the first pattern (in table order) that matches anywhere.
fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
