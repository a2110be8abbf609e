//! Profile rule scorer: integer score plus human-readable reasons for one
//! analyzed opportunity against a declared level and field list.
//!
//! Algorithm:
//! 1. Level: +5 if the profile level is one of the extracted levels,
//!    else +2 if the opportunity is open to all levels.
//! 2. Fields: +3 per profile field with a case-insensitive substring match
//!    (either direction) against any extracted field; first match wins.
//! 3. Bonus: +2 when more than one profile field matched.
//!
//! Matching is permissive: a short field such as "AI" matches
//! any extracted field containing those letters.

use tracing::{debug, info};

use crate::extraction::extractor::title_case;
use crate::models::{AnalyzedOpportunity, ExtractedAttributes, Profile, ScoredMatch};

const LEVEL_MATCH_POINTS: u32 = 5;
const ALL_LEVELS_POINTS: u32 = 2;
const FIELD_MATCH_POINTS: u32 = 3;
const MULTI_FIELD_BONUS: u32 = 2;

/// Scores one record. `None` when the total is zero.
pub fn score(attrs: &ExtractedAttributes, profile: &Profile) -> Option<(u32, Vec<String>)> {
    let mut total = 0;
    let mut reasons = Vec::new();

    if attrs.has_level(&profile.level) {
        total += LEVEL_MATCH_POINTS;
        reasons.push(format!("Level match: {}", profile.level));
    } else if attrs.is_open_to_all_levels() {
        total += ALL_LEVELS_POINTS;
        reasons.push("Open to all levels".to_string());
    }

    let opp_fields: Vec<String> = attrs
        .fields_of_study
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    let mut field_matches = 0;
    for user_field in profile.fields.iter().map(|f| f.to_lowercase()) {
        let hit = opp_fields
            .iter()
            .find(|opp_field| user_field.contains(opp_field.as_str()) || opp_field.contains(&user_field));
        if let Some(opp_field) = hit {
            total += FIELD_MATCH_POINTS;
            field_matches += 1;
            reasons.push(format!("Field match: {}", title_case(opp_field)));
        }
    }

    if field_matches > 1 {
        total += MULTI_FIELD_BONUS;
        reasons.push(format!("Multiple field matches ({field_matches})"));
    }

    (total > 0).then_some((total, reasons))
}

/// Scores every analyzed opportunity and returns the positive ones, highest
/// score first. Ties keep input order.
pub fn match_with_profile(
    opportunities: &[AnalyzedOpportunity],
    profile: &Profile,
) -> Vec<ScoredMatch> {
    info!(
        level = %profile.level,
        fields = %profile.fields.join(", "),
        "Matching opportunities with profile"
    );

    let mut matched: Vec<ScoredMatch> = opportunities
        .iter()
        .filter_map(|opp| {
            let (match_score, match_reasons) = score(&opp.attributes, profile)?;
            debug!(title = %opp.title, score = match_score, "Match found");
            Some(ScoredMatch {
                opportunity: opp.clone(),
                match_score,
                match_reasons,
            })
        })
        .collect();

    // sort_by is stable
    matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    info!(
        matched = matched.len(),
        total = opportunities.len(),
        "Profile matching complete"
    );
    matched
}
