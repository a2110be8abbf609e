//! Opportunity matcher: relevance filtering, attribute extraction and ranking
//! of scraped scholarship / internship / mobility announcements.

pub mod config;
pub mod decoder;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod store;
