// Normal-approximation confidence intervals of mean execution time

use serde::Serialize;

use crate::analysis::config::AnalysisConfig;
use crate::sample::Dataset;
use crate::stats;

/// Confidence interval of one algorithm's mean execution time (ns)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub algorithm: String,
    pub sample_count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// mean +/- z * (s / sqrt(n)) for every algorithm with enough samples
pub fn confidence_intervals(dataset: &Dataset, config: &AnalysisConfig) -> Vec<ConfidenceInterval> {
    dataset
        .by_algorithm()
        .into_iter()
        .filter(|(_, samples)| samples.len() >= config.min_samples_for_stddev)
        .filter_map(|(algorithm, samples)| {
            let times: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let mean = stats::mean(&times)?;
            let std_dev = stats::sample_std_dev(&times)?;
            let std_error = std_dev / (times.len() as f64).sqrt();
            let margin = config.z_score * std_error;
            Some(ConfidenceInterval {
                algorithm: algorithm.to_string(),
                sample_count: times.len(),
                mean,
                std_dev,
                std_error,
                lower: mean - margin,
                upper: mean + margin,
            })
        })
        .collect()
}
