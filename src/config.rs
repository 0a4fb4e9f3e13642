//! Benchmark configuration loaded from TOML
//!
//! Every section is optional; missing values fall back to the defaults of the
//! reference study.
//!
//! ```toml
//! output_dir = "results"
//!
//! [matrix]
//! algorithms = ["Quick Sort", "Merge Sort"]
//! sizes = [100, 200, 400]
//!
//! [measurement]
//! warmup_iterations = 200
//!
//! [analysis]
//! cv_threshold = 40.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::error::{BenchError, Result};
use crate::measurement::MeasurementConfig;
use crate::sweep::TestMatrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Directory receiving sample files and reports
    pub output_dir: PathBuf,
    pub matrix: TestMatrix,
    pub measurement: MeasurementConfig,
    pub analysis: AnalysisConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            matrix: TestMatrix::default(),
            measurement: MeasurementConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl BenchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.matrix
            .validate()
            .and_then(|_| self.measurement.validate())
            .and_then(|_| self.analysis.validate())
            .map_err(BenchError::Config)
    }
}
