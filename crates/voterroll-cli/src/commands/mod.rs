//! Subcommands and the helpers they share.

pub mod analyze;
pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod search;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::glob;
use tracing::{debug, warn};

use voterroll_core::models::config::VoterRollConfig;
use voterroll_core::{ExtractedRecord, RecordExtractor};

/// Load configuration from `config_path`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VoterRollConfig> {
    if let Some(path) = config_path {
        return VoterRollConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        VoterRollConfig::from_file(&default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()))
    } else {
        Ok(VoterRollConfig::default())
    }
}

/// Gender from the command line, falling back to the configured default.
pub fn resolve_gender<'a>(arg: Option<&'a str>, config: &'a VoterRollConfig) -> Option<&'a str> {
    arg.map(str::trim)
        .filter(|g| !g.is_empty())
        .or_else(|| config.default_gender())
}

/// Expand a glob pattern into the text files it names.
pub fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            p.is_file() && ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }

    Ok(files)
}

/// Read one file and extract its complete records.
pub fn extract_file(
    path: &Path,
    extractor: &RecordExtractor,
    default_gender: Option<&str>,
) -> anyhow::Result<Vec<ExtractedRecord>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let records = extractor
        .extract_bytes(&data, default_gender)
        .with_context(|| format!("Failed to process {}", path.display()))?;
    Ok(records)
}

/// Extract records from every file, skipping files that fail.
pub fn extract_all(
    files: &[PathBuf],
    extractor: &RecordExtractor,
    default_gender: Option<&str>,
) -> Vec<ExtractedRecord> {
    let mut records = Vec::new();
    for path in files {
        match extract_file(path, extractor, default_gender) {
            Ok(file_records) => records.extend(file_records),
            Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
        }
    }
    records
}
