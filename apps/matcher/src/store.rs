//! JSON record store: load scraped or analyzed collections, save any result
//! list as pretty-printed UTF-8 JSON.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::errors::MatcherError;
use crate::models::{AnalyzedOpportunity, OpportunityRecord};

pub fn load_opportunities(path: &Path) -> Result<Vec<OpportunityRecord>, MatcherError> {
    load_collection(path)
}

/// Loads the output of a previous analysis run.
pub fn load_analyzed(path: &Path) -> Result<Vec<AnalyzedOpportunity>, MatcherError> {
    load_collection(path)
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, MatcherError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MatcherError::NotFound(path.display().to_string()),
        _ => MatcherError::Io(e),
    })?;
    let records: Vec<T> = serde_json::from_str(&raw)?;
    info!(count = records.len(), path = %path.display(), "Loaded opportunities");
    Ok(records)
}

/// Writes `items` as an indented JSON array, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, items: &[T]) -> Result<(), MatcherError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json)?;
    info!(count = items.len(), path = %path.display(), "Saved results");
    Ok(())
}
