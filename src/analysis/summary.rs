// Descriptive statistics of a dataset

use serde::Serialize;

use crate::sample::Dataset;
use crate::stats;

/// Execution-time summary of one algorithm (ns)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub sample_count: usize,
    pub min_ns: f64,
    pub max_ns: f64,
    pub mean_ns: f64,
    pub median_ns: f64,
}

/// Dataset-wide comparison count range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub algorithms: Vec<AlgorithmSummary>,
    pub comparisons: Option<ComparisonSummary>,
}

impl DescriptiveSummary {
    /// Algorithms ordered fastest first by mean execution time
    pub fn fastest_first(&self) -> Vec<&AlgorithmSummary> {
        let mut ordered: Vec<&AlgorithmSummary> = self.algorithms.iter().collect();
        ordered.sort_by(|a, b| a.mean_ns.total_cmp(&b.mean_ns));
        ordered
    }
}

pub fn describe(dataset: &Dataset) -> DescriptiveSummary {
    let algorithms = dataset
        .by_algorithm()
        .into_iter()
        .filter_map(|(algorithm, samples)| {
            let times: Vec<f32> = samples.iter().map(|s| s.time_ns as f32).collect();
            let exact: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let summary = stats::simd_summary(&times)?;
            Some(AlgorithmSummary {
                algorithm: algorithm.to_string(),
                sample_count: samples.len(),
                min_ns: f64::from(summary.min),
                max_ns: f64::from(summary.max),
                mean_ns: stats::mean(&exact)?,
                median_ns: f64::from(stats::median_f32(&times)?),
            })
        })
        .collect();

    let counts: Vec<u64> = dataset.iter().map(|s| s.comparisons).collect();
    let comparisons = match (counts.iter().min(), counts.iter().max()) {
        (Some(&min), Some(&max)) => Some(ComparisonSummary {
            min,
            max,
            mean: counts.iter().map(|&c| c as f64).sum::<f64>() / counts.len() as f64,
        }),
        _ => None,
    };

    DescriptiveSummary {
        algorithms,
        comparisons,
    }
}
