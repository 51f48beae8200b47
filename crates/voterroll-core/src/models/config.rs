//! Configuration structures for the extraction pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoterRollError};

/// Main configuration for voterroll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoterRollConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Aggregate analysis configuration.
    pub analysis: AnalysisConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Gender applied to records that carry no gender label.
    pub default_gender: Option<String>,

    /// Date ages are computed against. Uses the local date when unset.
    pub reference_date: Option<NaiveDate>,
}

/// Aggregate analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width of age distribution buckets in years.
    pub age_bucket_width: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { age_bucket_width: 10 }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
}

/// Output format for extracted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON array of records.
    #[default]
    Json,
    /// CSV with one column per field.
    Csv,
    /// Plain text listing.
    Text,
}

impl VoterRollConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| VoterRollError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| VoterRollError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Configured default gender, ignoring blank values.
    pub fn default_gender(&self) -> Option<&str> {
        self.extraction
            .default_gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = VoterRollConfig::default();
        assert_eq!(config.analysis.age_bucket_width, 10);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.default_gender(), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: VoterRollConfig =
            serde_json::from_str(r#"{"extraction": {"default_gender": "Female"}}"#).unwrap();
        assert_eq!(config.default_gender(), Some("Female"));
        assert_eq!(config.analysis.age_bucket_width, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VoterRollConfig::default();
        config.extraction.reference_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        config.output.format = OutputFormat::Csv;
        config.save(&path).unwrap();

        assert_eq!(VoterRollConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            VoterRollConfig::from_file(&path),
            Err(VoterRollError::Config(_))
        ));
    }
}
