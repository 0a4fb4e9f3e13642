//! Numeric helpers shared by the measurement protocol and the analysis engine
//!
//! Integer medians and regression inputs stay in exact `u64`/`f64` arithmetic.
//! Scale-free summaries (CV, min/max, report medians) go through Trueno's SIMD
//! vectors and aprender's `DescriptiveStats`, which work in `f32`.

use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Median of integer values
///
/// Odd length returns the middle element of the sorted values; even length
/// returns the average of the two middle elements, rounded down.
pub fn median_u64(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        let (lo, hi) = (sorted[mid - 1], sorted[mid]);
        Some(lo + (hi - lo) / 2)
    } else {
        Some(sorted[mid])
    }
}

/// Median via aprender's quantile (R-7, QuickSelect)
pub fn median_f32(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let vector = Vector::from_slice(values);
    DescriptiveStats::new(&vector).quantile(0.5).ok()
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); needs at least 2 values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Summary of a value series computed with Trueno
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimdSummary {
    pub mean: f32,
    /// Population standard deviation
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
}

/// Mean, population std-dev, min and max of `values`
pub fn simd_summary(values: &[f32]) -> Option<SimdSummary> {
    if values.is_empty() {
        return None;
    }
    let v = Vector::from_slice(values);
    Some(SimdSummary {
        mean: v.mean().ok()?,
        stddev: v.stddev().ok()?,
        min: v.min().unwrap_or(0.0),
        max: v.max().unwrap_or(0.0),
    })
}

/// Coefficient of variation as a percentage (population std-dev / mean * 100)
///
/// Returns 0.0 for empty input or a mean of zero.
pub fn coefficient_of_variation(values: &[f32]) -> f32 {
    let Some(summary) = simd_summary(values) else {
        return 0.0;
    };
    if summary.mean.abs() < 1e-6 {
        return 0.0;
    }
    summary.stddev / summary.mean.abs() * 100.0
}
