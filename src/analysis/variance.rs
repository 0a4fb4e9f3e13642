// Variance decomposition of execution time
//
// One-way ANOVA with data shape as the factor, plus a per-size breakdown.

use serde::Serialize;

use crate::analysis::config::AnalysisConfig;
use crate::sample::Dataset;
use crate::stats;

/// One-way ANOVA of execution time by data shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaResult {
    /// Number of groups (k)
    pub groups: usize,
    /// Total observations (N)
    pub observations: usize,
    pub grand_mean: f64,
    pub ss_between: f64,
    pub ss_within: f64,
    pub ms_between: f64,
    pub ms_within: f64,
    pub f_statistic: f64,
    /// F above the configured rough critical value
    pub significant: bool,
}

/// ANOVA by shape; `None` when k < 2 or N <= k
pub fn anova_by_shape(dataset: &Dataset, config: &AnalysisConfig) -> Option<AnovaResult> {
    let groups: Vec<Vec<f64>> = dataset
        .by_shape()
        .into_iter()
        .map(|(_, samples)| samples.iter().map(|s| s.time_ns as f64).collect())
        .collect();

    let k = groups.len();
    let n = dataset.len();
    if k < 2 || n <= k {
        tracing::debug!("Skipping ANOVA: {} groups, {} observations", k, n);
        return None;
    }

    let all: Vec<f64> = groups.iter().flatten().copied().collect();
    let grand_mean = stats::mean(&all)?;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let group_mean = stats::mean(group)?;
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|x| (x - group_mean).powi(2)).sum::<f64>();
    }

    let ms_between = ss_between / (k - 1) as f64;
    let ms_within = ss_within / (n - k) as f64;
    let f_statistic = if ms_within == 0.0 {
        if ms_between == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ms_between / ms_within
    };

    Some(AnovaResult {
        groups: k,
        observations: n,
        grand_mean,
        ss_between,
        ss_within,
        ms_between,
        ms_within,
        f_statistic,
        significant: f_statistic > config.f_critical,
    })
}

/// Execution-time spread at one input size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeVariance {
    pub input_size: usize,
    pub sample_count: usize,
    pub mean_ns: f64,
    /// Sample standard deviation; 0.0 for a single sample
    pub std_dev_ns: f64,
    pub cv_percent: f64,
}

/// Mean, std-dev and CV of execution time per input size, ascending by size
pub fn variance_by_size(dataset: &Dataset) -> Vec<SizeVariance> {
    dataset
        .by_size()
        .into_iter()
        .map(|(input_size, samples)| {
            let times: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let mean_ns = stats::mean(&times).unwrap_or(0.0);
            let std_dev_ns = stats::sample_std_dev(&times).unwrap_or(0.0);
            let cv_percent = if mean_ns > 0.0 {
                std_dev_ns / mean_ns * 100.0
            } else {
                0.0
            };
            SizeVariance {
                input_size,
                sample_count: times.len(),
                mean_ns,
                std_dev_ns,
                cv_percent,
            }
        })
        .collect()
}
