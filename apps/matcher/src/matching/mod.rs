//! Ranking: rule-based profile scoring and CV-to-opportunity similarity.

pub mod cv_matcher;
pub mod cv_profile;
pub mod profile_scorer;

pub use cv_matcher::{match_cv, opportunity_text};
pub use cv_profile::build_cv_profile;
pub use profile_scorer::{match_with_profile, score};
