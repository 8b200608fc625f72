//! Assessment run configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use moleval_common::{MolevalError, Result};

fn default_suite_version() -> String {
    "v2".to_string()
}

fn default_number_samples() -> usize {
    10_000
}

fn default_output_file() -> PathBuf {
    PathBuf::from("assessment_results.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Suite version string, parsed by the suite builders.
    #[serde(default = "default_suite_version")]
    pub suite_version: String,

    /// Sample count per distribution-learning benchmark.
    #[serde(default = "default_number_samples")]
    pub number_samples: usize,

    /// Reference dataset (one molecule string per line). Required for the
    /// distribution-learning suite, unused for goal-directed runs.
    #[serde(default)]
    pub reference_file: Option<PathBuf>,

    /// Where the JSON report is written.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            suite_version: default_suite_version(),
            number_samples: default_number_samples(),
            reference_file: None,
            output_file: default_output_file(),
        }
    }
}

impl AssessmentConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| MolevalError::Config(format!("invalid assessment config: {e}")))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// The reference file, or a configuration error naming what is missing.
    pub fn require_reference_file(&self) -> Result<&Path> {
        self.reference_file.as_deref().ok_or_else(|| {
            MolevalError::Config(
                "reference_file is required for distribution-learning assessment".to_string(),
            )
        })
    }
}
