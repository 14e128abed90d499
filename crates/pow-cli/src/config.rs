//! Pipeline configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pow_core::{MappingOptions, PruneOptions};
use pow_ingest::IngestOptions;
use pow_link::{OracleConfig, ScoringConfig};

/// All tunables of a run. Every section and field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input: IngestOptions,
    pub mapping: MappingOptions,
    pub prune: PruneOptions,
    pub scoring: ScoringConfig,
    pub oracle: OracleConfig,
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse pipeline configuration")
    }

    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pow_ingest::Delimiter;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [input]
            delimiter = "tab"

            [mapping]
            processing_date = "2016-06-01"

            [prune]
            public_after_years = 70

            [scoring]
            acceptance_threshold = 30.0

            [oracle]
            retries = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.input.delimiter, Delimiter::Tab);
        assert_eq!(config.input.id_column, "nro");
        assert_eq!(
            config.mapping.processing_date,
            NaiveDate::from_ymd_opt(2016, 6, 1)
        );
        assert_eq!(config.prune.public_after_years, 70);
        assert_eq!(config.prune.common_name_threshold, 4);
        assert_eq!(config.scoring.acceptance_threshold, 30.0);
        assert_eq!(config.scoring.name_weight, 10.0);
        assert_eq!(config.oracle.retries, 0);
        assert_eq!(config.oracle.retry_delay_ms, 3000);
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(PipelineConfig::from_toml_str("[output]\nformat = \"xml\"").is_err());
    }
}
