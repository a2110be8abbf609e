use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Declared consumer profile used by the rule scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub level: String,
    pub fields: Vec<String>,
}

/// Attributes pulled out of a free-text CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub skills: BTreeSet<String>,
    pub education: Vec<String>,
    /// At most ten role mentions.
    pub experience: Vec<String>,
    pub languages: BTreeSet<String>,
    /// Up to fifty most frequent tokens, ties in first-seen order.
    pub keywords: Vec<String>,
}
