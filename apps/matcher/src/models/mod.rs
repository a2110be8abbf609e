pub mod analysis;
pub mod matches;
pub mod opportunity;
pub mod profile;

pub use analysis::{AcademicLevel, AnalyzedOpportunity, ExtractedAttributes, PdfAnalysis, NOT_SPECIFIED};
pub use matches::{ScoredMatch, SimilarityMatch};
pub use opportunity::{Attachment, OpportunityRecord};
pub use profile::{CvProfile, Profile};
