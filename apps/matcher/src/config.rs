use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_PROFILE_FIELDS: &str =
    "Computer Science,Data Science,Artificial Intelligence,Engineering";

/// Runtime configuration for the batch binary, loaded from environment variables.
/// Every variable is optional; the engines themselves never read it.
#[derive(Debug, Clone)]
pub struct Config {
    pub opportunities_file: PathBuf,
    /// Previously analyzed records; when set, scraping input and analysis are skipped.
    pub analyzed_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub profile_level: String,
    pub profile_fields: Vec<String>,
    pub cv_path: Option<PathBuf>,
    pub use_embeddings: bool,
    pub http_timeout_secs: u64,
    pub top_n: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            opportunities_file: env_or("OPPORTUNITIES_FILE", "uss_opportunities.json").into(),
            analyzed_file: optional_path(std::env::var("ANALYZED_FILE").ok()),
            output_dir: env_or("OUTPUT_DIR", ".").into(),
            profile_level: env_or("PROFILE_LEVEL", "Master"),
            profile_fields: split_list(&env_or("PROFILE_FIELDS", DEFAULT_PROFILE_FIELDS)),
            cv_path: optional_path(std::env::var("CV_PATH").ok()),
            use_embeddings: parse_bool(&env_or("USE_EMBEDDINGS", "true"))
                .context("USE_EMBEDDINGS must be true or false")?,
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            top_n: env_or("TOP_N", "10")
                .parse::<usize>()
                .context("TOP_N must be a positive integer")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Path of an output artifact inside the configured output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and blank values both mean "no path".
fn optional_path(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|p| !p.trim().is_empty()).map(PathBuf::from)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{other}' is not a boolean"),
    }
}
