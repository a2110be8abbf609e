//! CV profile builder: pattern extraction over a free-text CV.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;
use tracing::info;

use crate::extraction::patterns::{
    EDUCATION_PATTERNS, EXPERIENCE_PATTERNS, KEYWORD_STOP_WORDS, KEYWORD_TOKEN, LANGUAGE_PATTERN,
    MAX_EXPERIENCE, MAX_KEYWORDS, SKILL_PATTERNS,
};
use crate::models::CvProfile;

pub fn build_cv_profile(text: &str) -> CvProfile {
    let profile = CvProfile {
        skills: extract_skills(text),
        education: extract_education(text),
        experience: extract_experience(text),
        languages: extract_languages(text),
        keywords: extract_keywords(text),
    };

    info!(
        skills = profile.skills.len(),
        education = profile.education.len(),
        languages = profile.languages.len(),
        "Built CV profile"
    );
    profile
}

/// Skill mentions as written in the CV.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    SKILL_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_education(text: &str) -> Vec<String> {
    collect_spans(&EDUCATION_PATTERNS, text)
}

pub fn extract_experience(text: &str) -> Vec<String> {
    let mut experience = collect_spans(&EXPERIENCE_PATTERNS, text);
    experience.truncate(MAX_EXPERIENCE);
    experience
}

pub fn extract_languages(text: &str) -> BTreeSet<String> {
    LANGUAGE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Most frequent lower-case tokens; equal counts keep first-seen order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in KEYWORD_TOKEN.find_iter(&text_lower) {
        let word = m.as_str();
        if KEYWORD_STOP_WORDS.contains(&word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// All matches of every pattern, pattern order first, trimmed.
fn collect_spans(patterns: &[Regex], text: &str) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
