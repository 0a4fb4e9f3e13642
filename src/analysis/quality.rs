// Data quality checks: completeness against the test matrix and per-algorithm
// timing consistency

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::config::AnalysisConfig;
use crate::sample::{Cell, Dataset};
use crate::stats;

/// Expected vs observed coverage of the test matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessReport {
    pub expected_count: usize,
    pub actual_count: usize,
    /// actual / expected * 100 (may exceed 100 with repeated cells)
    pub completeness_percent: f64,
    /// Expected cells with no sample, in expected order
    pub missing: Vec<Cell>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare the dataset against the expected cells
pub fn check_completeness(dataset: &Dataset, expected: &[Cell]) -> CompletenessReport {
    let observed: BTreeSet<Cell> = dataset.iter().map(|s| s.cell()).collect();

    let mut seen = BTreeSet::new();
    let missing: Vec<Cell> = expected
        .iter()
        .filter(|cell| !observed.contains(*cell) && seen.insert((*cell).clone()))
        .cloned()
        .collect();

    let expected_count = expected.iter().collect::<BTreeSet<_>>().len();
    let completeness_percent = if expected_count == 0 {
        100.0
    } else {
        dataset.len() as f64 / expected_count as f64 * 100.0
    };

    CompletenessReport {
        expected_count,
        actual_count: dataset.len(),
        completeness_percent,
        missing,
    }
}

/// Timing dispersion of one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmConsistency {
    pub algorithm: String,
    pub sample_count: usize,
    pub mean_ns: f64,
    /// Population coefficient of variation, percent
    pub cv_percent: f64,
    pub high_variability: bool,
}

/// Consistency of every algorithm plus operation-count anomalies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub algorithms: Vec<AlgorithmConsistency>,
    /// Cells with size > 1 and no recorded comparisons
    pub anomalies: Vec<Cell>,
}

impl ConsistencyReport {
    /// Algorithms flagged as highly variable
    pub fn flagged(&self) -> impl Iterator<Item = &AlgorithmConsistency> {
        self.algorithms.iter().filter(|a| a.high_variability)
    }
}

/// CV of execution time per algorithm, flagged above `config.cv_threshold`
pub fn check_consistency(dataset: &Dataset, config: &AnalysisConfig) -> ConsistencyReport {
    let algorithms = dataset
        .by_algorithm()
        .into_iter()
        .map(|(algorithm, samples)| {
            let times: Vec<f32> = samples.iter().map(|s| s.time_ns as f32).collect();
            let exact: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let cv_percent = f64::from(stats::coefficient_of_variation(&times));
            AlgorithmConsistency {
                algorithm: algorithm.to_string(),
                sample_count: samples.len(),
                mean_ns: stats::mean(&exact).unwrap_or(0.0),
                cv_percent,
                high_variability: cv_percent > config.cv_threshold,
            }
        })
        .collect();

    let anomalies = dataset
        .iter()
        .filter(|s| s.has_operation_anomaly())
        .map(|s| s.cell())
        .collect();

    ConsistencyReport {
        algorithms,
        anomalies,
    }
}
