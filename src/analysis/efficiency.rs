// Efficiency scoring and ranking
//
// Scores are normalized against the best (lowest) per-algorithm mean, so the
// fastest algorithm scores 100 on speed and everything else scores below.
// An algorithm without a positive mean time (every sample exhausted) scores 0
// and ranks after every measured algorithm.

use serde::Serialize;

use crate::analysis::config::AnalysisConfig;
use crate::sample::Dataset;
use crate::stats;

/// Weighted efficiency score of one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyScore {
    pub algorithm: String,
    pub mean_time_ns: f64,
    /// Mean of the available, non-zero memory readings
    pub mean_memory_bytes: Option<f64>,
    pub speed_score: f64,
    pub memory_score: f64,
    pub overall_score: f64,
    /// False when no sample of the algorithm carries a positive time
    pub measured: bool,
    /// 1-based rank by overall score, ties in input order
    pub rank: usize,
}

fn normalized(best: Option<f64>, value: Option<f64>) -> f64 {
    match (best, value) {
        (Some(best), Some(value)) if value > 0.0 => best / value * 100.0,
        _ => 100.0,
    }
}

fn min_positive(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .flatten()
        .filter(|v| *v > 0.0)
        .reduce(f64::min)
}

/// Score and rank every algorithm, returned in rank order
pub fn efficiency_scores(dataset: &Dataset, config: &AnalysisConfig) -> Vec<EfficiencyScore> {
    let means: Vec<(&str, Option<f64>, Option<f64>)> = dataset
        .by_algorithm()
        .into_iter()
        .map(|(algorithm, samples)| {
            let times: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let memory: Vec<f64> = samples
                .iter()
                .filter_map(|s| s.memory_bytes)
                .filter(|&m| m > 0)
                .map(|m| m as f64)
                .collect();
            (algorithm, stats::mean(&times), stats::mean(&memory))
        })
        .collect();

    let best_time = min_positive(means.iter().map(|(_, t, _)| *t));
    let best_memory = min_positive(means.iter().map(|(_, _, m)| *m));

    let mut scores: Vec<EfficiencyScore> = means
        .into_iter()
        .map(|(algorithm, time, memory)| {
            let measured = time.is_some_and(|t| t > 0.0);
            let (speed_score, memory_score) = if measured {
                (normalized(best_time, time), normalized(best_memory, memory))
            } else {
                tracing::debug!("{} has no measured time; ranked last", algorithm);
                (0.0, 0.0)
            };
            EfficiencyScore {
                algorithm: algorithm.to_string(),
                mean_time_ns: time.unwrap_or(0.0),
                mean_memory_bytes: memory,
                speed_score,
                memory_score,
                overall_score: config.speed_weight * speed_score
                    + config.memory_weight * memory_score,
                measured,
                rank: 0,
            }
        })
        .collect();

    // Stable: equal scores keep first-appearance order
    scores.sort_by(|a, b| {
        b.measured
            .cmp(&a.measured)
            .then(b.overall_score.total_cmp(&a.overall_score))
    });
    for (idx, score) in scores.iter_mut().enumerate() {
        score.rank = idx + 1;
    }
    scores
}
