//! Keyword lists and regular expressions used by the extractors.
//!
//! Ordered tables are evaluated first-match-wins by their callers, so the
//! position of an entry is part of its meaning. Do not reorder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::AcademicLevel;

// ────────────────────────────────────────────────────────────────────────────
// Relevance
// ────────────────────────────────────────────────────────────────────────────

/// Substrings that mark an announcement as aimed at students (EN/FR).
pub const RELEVANCE_KEYWORDS: &[&str] = &[
    "student",
    "étudiant",
    "étudiante",
    "undergraduate",
    "graduate",
    "master",
    "doctorat",
    "phd",
    "licence",
    "bachelor",
    "élève",
    "academic",
    "université",
    "university",
    "scholarship",
    "bourse",
    "mobility",
    "mobilité",
    "exchange",
    "échange",
    "formation",
    "training",
    "internship",
    "stage",
];

// ────────────────────────────────────────────────────────────────────────────
// Opportunity attributes
// ────────────────────────────────────────────────────────────────────────────

/// Field-of-study vocabulary, matched as lower-case substrings.
pub const FIELD_KEYWORDS: &[&str] = &[
    "engineering",
    "ingénierie",
    "computer science",
    "informatique",
    "medicine",
    "médecine",
    "business",
    "management",
    "économie",
    "economics",
    "law",
    "droit",
    "mathematics",
    "mathématiques",
    "physics",
    "physique",
    "chemistry",
    "chimie",
    "biology",
    "biologie",
    "architecture",
    "arts",
    "humanities",
    "sciences sociales",
    "social sciences",
    "psychology",
    "psychologie",
    "education",
    "éducation",
    "environmental",
    "environnement",
    "agriculture",
    "agronomie",
    "data science",
    "artificial intelligence",
    "intelligence artificielle",
    "cybersecurity",
    "cybersécurité",
    "finance",
    "accounting",
    "comptabilité",
    "marketing",
    "communication",
    "journalism",
    "journalisme",
    "nursing",
    "soins infirmiers",
    "pharmacy",
    "pharmacie",
];

/// Lead-in word followed by a capitalized phrase of one to three words on
/// the same line. Group 1 is the phrase.
pub static FIELD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i:(?:field|domain|domaine|spécialit|area)s?)[:\s]+(\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+){0,2})",
        )
        .unwrap(),
        Regex::new(r"(?i:study|études|filière)[:\s]+(\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+){0,2})")
            .unwrap(),
    ]
});

/// Duration patterns in precedence order: short numeric forms first, then
/// the labeled clause, then "for/pendant N months".
pub static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(\d+)\s*(?:mois|months?)").unwrap(),
        Regex::new(r"(?i)(\d+)\s*(?:ans?|years?)").unwrap(),
        Regex::new(r"(?i)(\d+)\s*(?:semaines?|weeks?)").unwrap(),
        Regex::new(r"(?i)(?:duration|durée)[:\s]*([^\n.]{1,100})").unwrap(),
        Regex::new(r"(?i)(?:for|pendant)[:\s]+(\d+\s*(?:months?|years?|mois|ans?))").unwrap(),
    ]
});

/// Application period / deadline patterns in precedence order.
pub static PERIOD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:deadline|date limite|application deadline)[:\s]*([^\n.]{1,100})")
            .unwrap(),
        Regex::new(r"(?i)(?:period|période|dates?)[:\s]*([^\n.]{1,100})").unwrap(),
        Regex::new(r"(?i)(?:from|du|de)\s+([A-Za-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap(),
        Regex::new(
            r"(?i)(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}",
        )
        .unwrap(),
        Regex::new(
            r"(?i)(?:janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre)\s+\d{1,2},?\s+\d{4}",
        )
        .unwrap(),
        Regex::new(r"(?i)(?:until|jusqu|avant|before)[:\s]+([^\n.]{1,80})").unwrap(),
    ]
});

/// Lower-case level keywords. Groups are not exclusive.
pub const LEVEL_KEYWORDS: &[(AcademicLevel, &[&str])] = &[
    (
        AcademicLevel::Bachelor,
        &["bachelor", "licence", "undergraduate", "l3", "first degree", "bac+3"],
    ),
    (
        AcademicLevel::Master,
        &["master", "graduate", "m1", "m2", "postgraduate", "bac+5"],
    ),
    (
        AcademicLevel::PhD,
        &["phd", "doctorat", "doctoral", "doctorate", "ph.d", "bac+8", "third cycle"],
    ),
];

/// Labeled requirement clauses, collected in pattern-then-occurrence order.
pub static REQUIREMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:requirements?|required|requise?|conditions?)[:\s]*([^\n.]{10,200})")
            .unwrap(),
        Regex::new(r"(?i)(?:eligibility|éligibilité|eligible)[:\s]*([^\n.]{10,200})").unwrap(),
        Regex::new(r"(?i)(?:must have|doit avoir|must be|doit être)[:\s]*([^\n.]{10,200})")
            .unwrap(),
        Regex::new(r"(?i)(?:criteria|critères)[:\s]*([^\n.]{10,200})").unwrap(),
    ]
});

pub const MAX_REQUIREMENTS: usize = 10;
pub const MIN_REQUIREMENT_CHARS: usize = 15;

// ────────────────────────────────────────────────────────────────────────────
// CV vocabulary
// ────────────────────────────────────────────────────────────────────────────

pub static SKILL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(?:Python|Java|C\+\+|JavaScript|TypeScript|React|Node\.js|Django|Flask)\b",
        )
        .unwrap(),
        Regex::new(r"(?i)\b(?:Machine Learning|Deep Learning|AI|Data Science|Big Data)\b").unwrap(),
        Regex::new(r"(?i)\b(?:SQL|MongoDB|PostgreSQL|MySQL|NoSQL)\b").unwrap(),
        Regex::new(r"(?i)\b(?:AWS|Azure|GCP|Docker|Kubernetes|Git)\b").unwrap(),
        Regex::new(r"(?i)\b(?:TensorFlow|PyTorch|Scikit-learn|Pandas|NumPy)\b").unwrap(),
        Regex::new(r"(?i)\b(?:HTML|CSS|REST API|GraphQL|Microservices)\b").unwrap(),
    ]
});

/// Degree mention plus up to 100 trailing characters on the same line.
pub static EDUCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:Bachelor|Licence|BSc|B\.Sc)[^\n]{0,100}").unwrap(),
        Regex::new(r"(?i)(?:Master|MSc|M\.Sc|MBA)[^\n]{0,100}").unwrap(),
        Regex::new(r"(?i)(?:PhD|Doctorat|Doctorate)[^\n]{0,100}").unwrap(),
    ]
});

pub static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:Developer|Engineer|Scientist|Analyst|Manager|Consultant)[^\n]{0,100}")
            .unwrap(),
        Regex::new(r"(?i)(?:Intern|Stage|Internship)[^\n]{0,100}").unwrap(),
    ]
});

pub const MAX_EXPERIENCE: usize = 10;

pub static LANGUAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:English|French|Français|Spanish|German|Arabic|Arabe|Italian|Chinese)\b",
    )
    .unwrap()
});

/// Alphabetic tokens of four or more ASCII letters.
pub static KEYWORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]{4,}\b").unwrap());

pub const KEYWORD_STOP_WORDS: &[&str] = &["with", "from", "have", "this", "that", "were", "been"];

pub const MAX_KEYWORDS: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(FIELD_PATTERNS.len(), 2);
        assert_eq!(DURATION_PATTERNS.len(), 5);
        assert_eq!(PERIOD_PATTERNS.len(), 7);
        assert_eq!(REQUIREMENT_PATTERNS.len(), 4);
        assert_eq!(SKILL_PATTERNS.len(), 6);
        assert_eq!(EDUCATION_PATTERNS.len(), 3);
        assert_eq!(EXPERIENCE_PATTERNS.len(), 2);
        assert!(LANGUAGE_PATTERN.is_match("Fluent in French"));
        assert!(KEYWORD_TOKEN.is_match("python"));
    }

    #[test]
    fn test_keyword_tables_are_lowercase() {
        for kw in RELEVANCE_KEYWORDS.iter().chain(FIELD_KEYWORDS) {
            assert_eq!(*kw, kw.to_lowercase(), "keyword '{kw}' must be lower-case");
        }
        for (_, keywords) in LEVEL_KEYWORDS {
            for kw in *keywords {
                assert_eq!(*kw, kw.to_lowercase(), "level keyword '{kw}' must be lower-case");
            }
        }
    }

    #[test]
    fn test_field_pattern_requires_capitalized_phrase() {
        let caps = FIELD_PATTERNS[0]
            .captures("Domaine: Génie Civil et autres")
            .unwrap();
        assert_eq!(&caps[1], "Génie Civil");
        assert!(FIELD_PATTERNS[1].captures("study: abroad").is_none());
    }
}
