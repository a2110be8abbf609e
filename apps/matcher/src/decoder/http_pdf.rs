use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::decoder::{DecodeOutcome, DocumentDecoder};

/// Downloads a PDF over HTTP and extracts its text with `pdf-extract`.
#[derive(Clone)]
pub struct HttpPdfDecoder {
    client: Client,
}

impl HttpPdfDecoder {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl DocumentDecoder for HttpPdfDecoder {
    async fn decode(&self, url: &str) -> DecodeOutcome {
        debug!(url, "Downloading PDF");
        let bytes = match self.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url, error = %e, "PDF download failed");
                return DecodeOutcome::Unavailable(e.to_string());
            }
        };

        // pdf-extract is CPU bound and may panic on malformed files.
        let extracted = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match extracted {
            Ok(Ok(text)) => {
                info!(url, chars = text.chars().count(), "Extracted PDF text");
                DecodeOutcome::Text(text)
            }
            Ok(Err(reason)) => {
                warn!(url, error = %reason, "PDF text extraction failed");
                DecodeOutcome::Unavailable(reason)
            }
            Err(join_err) => {
                warn!(url, error = %join_err, "PDF decoder worker crashed");
                DecodeOutcome::Unavailable(join_err.to_string())
            }
        }
    }
}
