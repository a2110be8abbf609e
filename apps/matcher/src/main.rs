use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::config::Config;
use matcher::decoder::{load_cv, HttpPdfDecoder};
use matcher::matching::{build_cv_profile, match_cv, match_with_profile};
use matcher::models::{AnalyzedOpportunity, Profile};
use matcher::pipeline::{analyze_all, filter_relevant};
use matcher::report;
use matcher::similarity::select_backend;
use matcher::store;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting opportunity matcher v{}", env!("CARGO_PKG_VERSION"));

    let analyzed = match &config.analyzed_file {
        Some(path) => store::load_analyzed(path)
            .with_context(|| format!("Failed to load analyzed opportunities from {}", path.display()))?,
        None => analyze(&config).await?,
    };

    let profile = Profile {
        level: config.profile_level.clone(),
        fields: config.profile_fields.clone(),
    };
    info!(level = %profile.level, fields = ?profile.fields, "Matching with profile");
    let matched = match_with_profile(&analyzed, &profile);
    store::save_json(&config.output_path("matched_opportunities.json"), &matched)?;
    println!("{}", report::top_profile_matches(&matched, config.top_n));

    match config.cv_path.clone() {
        // Model loading and ranking are blocking work.
        Some(cv_path) => {
            let config = config.clone();
            tokio::task::spawn_blocking(move || match_cv_file(&config, &cv_path, analyzed))
                .await
                .context("CV matching task failed")??
        }
        None => info!("CV_PATH not set; skipping CV matching"),
    }

    info!("Analysis complete");
    Ok(())
}

/// Load, filter and analyze the scraped records, saving each stage.
async fn analyze(config: &Config) -> Result<Vec<AnalyzedOpportunity>> {
    let records = store::load_opportunities(&config.opportunities_file).with_context(|| {
        format!(
            "Failed to load opportunities from {}",
            config.opportunities_file.display()
        )
    })?;

    let students = filter_relevant(records);
    store::save_json(&config.output_path("student_opportunities.json"), &students)?;

    let decoder = HttpPdfDecoder::new(config.http_timeout_secs);
    let outcome = analyze_all(&students, &decoder).await;
    store::save_json(&config.output_path("analyzed_opportunities.json"), &outcome.analyzed)?;

    Ok(outcome.analyzed)
}

fn match_cv_file(config: &Config, cv_path: &Path, analyzed: Vec<AnalyzedOpportunity>) -> Result<()> {
    let cv_text = match load_cv(cv_path) {
        Ok(text) => text,
        // An unreadable CV format only skips CV matching; a missing file aborts.
        Err(e) if !e.is_fatal_input() => {
            error!(path = %cv_path.display(), error = %e, "Failed to load CV; skipping CV matching");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load CV from {}", cv_path.display()))
        }
    };
    let cv_profile = build_cv_profile(&cv_text);
    println!("{}", report::cv_summary(&cv_profile, &cv_text));

    let backend = select_backend(config.use_embeddings);
    let matched = match_cv(&cv_text, analyzed, backend.as_ref())?;
    store::save_json(&config.output_path("cv_matched_opportunities.json"), &matched)?;
    println!("{}", report::top_cv_matches(&matched, &cv_profile, config.top_n));

    if let Some(top) = matched.first() {
        info!(
            title = %top.opportunity.title,
            score = top.similarity_percentage,
            "Top match for CV"
        );
    }
    Ok(())
}
