//! Document decoding collaborators: text in, string out.
//!
//! Decoders never fail outward. Anything that goes wrong while fetching or
//! parsing becomes `DecodeOutcome::Unavailable`, which callers treat as empty
//! text.

pub mod cv_file;
pub mod http_pdf;

use async_trait::async_trait;

pub use cv_file::load_cv;
pub use http_pdf::HttpPdfDecoder;

/// Result of one decode attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Text(String),
    /// Carries the reason, for logging only.
    Unavailable(String),
}

impl DecodeOutcome {
    pub fn into_text(self) -> String {
        match self {
            DecodeOutcome::Text(text) => text,
            DecodeOutcome::Unavailable(_) => String::new(),
        }
    }
}

/// Turns a document location (url or path) into plain text.
#[async_trait]
pub trait DocumentDecoder: Send + Sync {
    async fn decode(&self, location: &str) -> DecodeOutcome;
}
