// Statistical analysis of sort benchmark datasets
//
// Every analysis reads a finished Dataset and derives its metrics without
// side effects; only the report writer touches the filesystem. Nothing here is
// fatal: groups below a metric's minimum sample count are skipped.
//
// Analyses:
// - Completeness against the expected test matrix
// - Timing consistency (coefficient of variation) and operation-count anomalies
// - 95% confidence intervals of mean execution time
// - Complexity-class fitting (linear, quadratic, linearithmic) with R²
// - One-way ANOVA by data shape and a per-size variance breakdown
// - Efficiency scoring and ranking
//
// Implementation:
// - Uses trueno for SIMD summaries (CV, min/max)
// - Uses aprender's DescriptiveStats for medians
// - Regression and ANOVA sums stay in f64

mod complexity;
mod confidence;
mod config;
mod efficiency;
mod quality;
mod report;
mod summary;
mod variance;

pub use complexity::{
    analyze_complexity, best_fit, fit_linear, fit_linearithmic, fit_quadratic, growth_rate,
    validate_growth, AlgorithmComplexity, ComplexityClass, ComplexityModel, GrowthValidation,
};
pub use confidence::{confidence_intervals, ConfidenceInterval};
pub use config::AnalysisConfig;
pub use efficiency::{efficiency_scores, EfficiencyScore};
pub use quality::{
    check_completeness, check_consistency, AlgorithmConsistency, CompletenessReport,
    ConsistencyReport,
};
pub use report::{analyze, AnalysisReport};
pub use summary::{describe, AlgorithmSummary, ComparisonSummary, DescriptiveSummary};
pub use variance::{anova_by_shape, variance_by_size, AnovaResult, SizeVariance};

#[cfg(test)]
mod tests;
