//! Plain-text summaries of ranked results, printed by the binary.

use std::fmt;

use crate::matching::opportunity_text;
use crate::models::{AnalyzedOpportunity, CvProfile, ScoredMatch, SimilarityMatch, NOT_SPECIFIED};

const RULE_WIDTH: usize = 70;
const MAX_LISTED_FIELDS: usize = 3;
const MAX_MATCHING_SKILLS: usize = 5;
const MAX_SUMMARY_EDUCATION: usize = 3;
const MAX_SUMMARY_SKILLS: usize = 10;

pub fn top_profile_matches(matches: &[ScoredMatch], n: usize) -> String {
    ProfileMatchReport { matches, n }.to_string()
}

/// Top `n` CV matches, each with up to five CV skills found in its text.
pub fn top_cv_matches(matches: &[SimilarityMatch], cv_profile: &CvProfile, n: usize) -> String {
    CvMatchReport {
        matches,
        cv_profile,
        n,
    }
    .to_string()
}

pub fn cv_summary(cv_profile: &CvProfile, cv_text: &str) -> String {
    CvSummary {
        cv_profile,
        cv_text,
    }
    .to_string()
}

/// CV skills mentioned in the opportunity, case-insensitive, at most five.
pub fn matching_skills<'a>(cv_profile: &'a CvProfile, opp: &AnalyzedOpportunity) -> Vec<&'a str> {
    let text = opportunity_text(opp).to_lowercase();
    cv_profile
        .skills
        .iter()
        .filter(|skill| text.contains(&skill.to_lowercase()))
        .map(String::as_str)
        .take(MAX_MATCHING_SKILLS)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

pub struct ProfileMatchReport<'a> {
    pub matches: &'a [ScoredMatch],
    pub n: usize,
}

pub struct CvMatchReport<'a> {
    pub matches: &'a [SimilarityMatch],
    pub cv_profile: &'a CvProfile,
    pub n: usize,
}

pub struct CvSummary<'a> {
    pub cv_profile: &'a CvProfile,
    pub cv_text: &'a str,
}

fn write_banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f, "{rule}")?;
    writeln!(f, "{title}")?;
    writeln!(f, "{rule}")
}

fn write_heading(f: &mut fmt::Formatter<'_>, rank: usize, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{rank}. {title}")?;
    writeln!(f, "   {}", "-".repeat(RULE_WIDTH - 4))
}

fn write_attributes(f: &mut fmt::Formatter<'_>, opp: &AnalyzedOpportunity) -> fmt::Result {
    let attrs = &opp.attributes;
    let levels = attrs
        .level
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let fields = if attrs.fields_of_study.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        attrs
            .fields_of_study
            .iter()
            .take(MAX_LISTED_FIELDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    writeln!(f, "   Level: {levels}")?;
    writeln!(f, "   Fields: {fields}")?;
    writeln!(f, "   Duration: {}", attrs.duration)?;
    writeln!(f, "   Period: {}", attrs.period)?;
    writeln!(f, "   URL: {}", opp.url)
}

impl fmt::Display for ProfileMatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.n.min(self.matches.len());
        write_banner(f, &format!("TOP {shown} MATCHED OPPORTUNITIES"))?;

        for (i, m) in self.matches.iter().take(self.n).enumerate() {
            write_heading(f, i + 1, &m.opportunity.title)?;
            writeln!(f, "   Match Score: {}", m.match_score)?;
            write_attributes(f, &m.opportunity)?;
            writeln!(f)?;
            writeln!(f, "   Match Reasons:")?;
            for reason in &m.match_reasons {
                writeln!(f, "      - {reason}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CvMatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.n.min(self.matches.len());
        write_banner(f, &format!("TOP {shown} MATCHES FOR YOUR CV"))?;

        for (i, m) in self.matches.iter().take(self.n).enumerate() {
            write_heading(f, i + 1, &m.opportunity.title)?;
            writeln!(f, "   Match Score: {}%", m.similarity_percentage)?;
            write_attributes(f, &m.opportunity)?;

            let skills = matching_skills(self.cv_profile, &m.opportunity);
            if !skills.is_empty() {
                writeln!(f, "   Matching Skills: {}", skills.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CvSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.cv_profile;
        write_banner(f, "YOUR CV SUMMARY")?;

        writeln!(f, "\nEducation:")?;
        for edu in profile.education.iter().take(MAX_SUMMARY_EDUCATION) {
            writeln!(f, "   - {edu}")?;
        }

        writeln!(f, "\nTop Skills:")?;
        for skill in profile.skills.iter().take(MAX_SUMMARY_SKILLS) {
            writeln!(f, "   - {skill}")?;
        }

        writeln!(f, "\nLanguages:")?;
        for lang in &profile.languages {
            writeln!(f, "   - {lang}")?;
        }

        writeln!(f, "\nCV Statistics:")?;
        writeln!(f, "   - Total length: {} characters", self.cv_text.chars().count())?;
        writeln!(f, "   - Skills found: {}", profile.skills.len())?;
        writeln!(f, "   - Experience entries: {}", profile.experience.len())
    }
}
