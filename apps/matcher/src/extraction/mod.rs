//! Information extraction: relevance pre-filter and attribute extraction over
//! an opportunity's combined text. Everything here is a pure function of its
//! input text; attachment decoding happens in the pipeline.

pub mod extractor;
pub mod patterns;
pub mod relevance;

pub use extractor::{
    extract, extract_duration, extract_fields_of_study, extract_level, extract_period,
    extract_requirements,
};
pub use relevance::{is_relevant, is_relevant_record};
