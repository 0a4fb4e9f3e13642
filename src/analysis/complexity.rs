// Empirical complexity-class fitting
//
// Three least-squares models are fitted to (size, time) pairs of one
// algorithm on one data shape:
//   linear        t = a*n + b
//   quadratic     t = a*n^2          (through the origin)
//   linearithmic  t = a*n*ln(n)      (through the origin)
// The model with the highest coefficient of determination wins. Closed-form
// sums of products are enough here; no solver is needed.

use std::fmt;

use serde::Serialize;

use crate::algorithms;
use crate::analysis::config::AnalysisConfig;
use crate::sample::{group_in_order, Dataset, Sample};

/// Closed set of complexity classes the engine can fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComplexityClass {
    Linear,
    Quadratic,
    Linearithmic,
}

impl ComplexityClass {
    pub const ALL: [ComplexityClass; 3] = [
        ComplexityClass::Linear,
        ComplexityClass::Quadratic,
        ComplexityClass::Linearithmic,
    ];

    /// Big-O notation of the class
    pub fn notation(&self) -> &'static str {
        match self {
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Quadratic => "O(n²)",
            ComplexityClass::Linearithmic => "O(n log n)",
        }
    }

    /// Parse a routine's declared time complexity ("O(n²)", "O(n^2)", "O(n log n)", "O(n)")
    pub fn from_notation(notation: &str) -> Option<Self> {
        let compact: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.contains("n²") || compact.contains("n^2") || compact.contains("n*n") {
            Some(ComplexityClass::Quadratic)
        } else if compact.contains("nlogn") {
            Some(ComplexityClass::Linearithmic)
        } else if compact == "o(n)" {
            Some(ComplexityClass::Linear)
        } else {
            None
        }
    }

    /// Basis function value for input size `n`
    fn basis(&self, n: f64) -> f64 {
        match self {
            ComplexityClass::Linear => n,
            ComplexityClass::Quadratic => n * n,
            ComplexityClass::Linearithmic => {
                if n > 0.0 {
                    n * n.ln()
                } else {
                    0.0
                }
            }
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComplexityClass::Linear => "linear",
            ComplexityClass::Quadratic => "quadratic",
            ComplexityClass::Linearithmic => "linearithmic",
        };
        f.write_str(label)
    }
}

/// One fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityModel {
    pub class: ComplexityClass,
    /// Scale coefficient `a`
    pub coefficient: f64,
    /// Intercept `b` (linear model only, zero otherwise)
    pub intercept: f64,
    pub r_squared: f64,
}

impl ComplexityModel {
    pub fn predict(&self, n: f64) -> f64 {
        self.coefficient * self.class.basis(n) + self.intercept
    }
}

/// Best-fitting model and growth rate of one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmComplexity {
    pub algorithm: String,
    pub sample_count: usize,
    pub best: ComplexityModel,
    /// All candidate fits in `ComplexityClass::ALL` order
    pub models: Vec<ComplexityModel>,
    pub growth_rate: f64,
}

fn r_squared(sizes: &[f64], times: &[f64], model: &ComplexityModel) -> f64 {
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let ss_tot: f64 = times.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = sizes
        .iter()
        .zip(times)
        .map(|(&n, &y)| (y - model.predict(n)).powi(2))
        .sum();

    if ss_tot == 0.0 {
        // Constant observations: only a perfect fit explains them
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Ordinary least squares `t = a*n + b`
pub fn fit_linear(sizes: &[f64], times: &[f64]) -> Option<ComplexityModel> {
    if sizes.is_empty() || sizes.len() != times.len() {
        return None;
    }
    let len = sizes.len() as f64;
    let mean_x = sizes.iter().sum::<f64>() / len;
    let mean_y = times.iter().sum::<f64>() / len;
    let sxx: f64 = sizes.iter().map(|x| (x - mean_x).powi(2)).sum();
    let sxy: f64 = sizes
        .iter()
        .zip(times)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let mut model = ComplexityModel {
        class: ComplexityClass::Linear,
        coefficient: slope,
        intercept: mean_y - slope * mean_x,
        r_squared: 0.0,
    };
    model.r_squared = r_squared(sizes, times, &model);
    Some(model)
}

/// Least squares through the origin: a = sum(f*t) / sum(f^2)
fn fit_through_origin(
    class: ComplexityClass,
    sizes: &[f64],
    times: &[f64],
) -> Option<ComplexityModel> {
    if sizes.is_empty() || sizes.len() != times.len() {
        return None;
    }
    let (sfy, sff) = sizes
        .iter()
        .zip(times)
        .fold((0.0, 0.0), |(sfy, sff), (&n, &y)| {
            let f = class.basis(n);
            (sfy + f * y, sff + f * f)
        });

    let mut model = ComplexityModel {
        class,
        coefficient: if sff == 0.0 { 0.0 } else { sfy / sff },
        intercept: 0.0,
        r_squared: 0.0,
    };
    model.r_squared = r_squared(sizes, times, &model);
    Some(model)
}

/// `t = a*n^2`
pub fn fit_quadratic(sizes: &[f64], times: &[f64]) -> Option<ComplexityModel> {
    fit_through_origin(ComplexityClass::Quadratic, sizes, times)
}

/// `t = a*n*ln(n)`
pub fn fit_linearithmic(sizes: &[f64], times: &[f64]) -> Option<ComplexityModel> {
    fit_through_origin(ComplexityClass::Linearithmic, sizes, times)
}

/// Fit every class; returns (best, all fits). Ties keep the earlier class.
pub fn best_fit(sizes: &[f64], times: &[f64]) -> Option<(ComplexityModel, Vec<ComplexityModel>)> {
    let models: Vec<ComplexityModel> = vec![
        fit_linear(sizes, times)?,
        fit_quadratic(sizes, times)?,
        fit_linearithmic(sizes, times)?,
    ];
    let best = models
        .iter()
        .copied()
        .reduce(|best, m| if m.r_squared > best.r_squared { m } else { best })?;
    Some((best, models))
}

/// Empirical growth of one (algorithm, shape) group beside the routine's
/// declared complexity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthValidation {
    pub algorithm: String,
    pub shape: String,
    pub sample_count: usize,
    /// Mean of (time ratio / size ratio) over consecutive sizes
    pub growth_rate: f64,
    /// Declared time complexity; `None` for routines outside the registry
    pub declared: Option<String>,
    /// Growth rate the declared class predicts for the same sizes
    pub expected_growth_rate: Option<f64>,
}

fn growth_ratios(samples: &[&Sample]) -> Vec<f64> {
    let mut ordered: Vec<&Sample> = samples.to_vec();
    ordered.sort_by_key(|s| s.input_size);

    ordered
        .windows(2)
        .filter_map(|pair| {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.input_size == 0 || prev.time_ns == 0 {
                return None;
            }
            let size_ratio = cur.input_size as f64 / prev.input_size as f64;
            let time_ratio = cur.time_ns as f64 / prev.time_ns as f64;
            (size_ratio > 1.0 && time_ratio > 0.0).then_some(time_ratio / size_ratio)
        })
        .collect()
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Mean of (time ratio / size ratio) over consecutive size-ordered samples
///
/// Pairs whose size does not increase, or whose earlier time is zero, are
/// skipped. Returns 0.0 when no pair qualifies.
pub fn growth_rate(samples: &[&Sample]) -> f64 {
    mean_or_zero(&growth_ratios(samples))
}

/// Growth rate an exact `class` curve shows over `sizes`
fn class_growth_rate(class: ComplexityClass, sizes: &[usize]) -> Option<f64> {
    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();

    let ratios: Vec<f64> = sizes
        .windows(2)
        .filter_map(|pair| {
            let (prev, cur) = (pair[0] as f64, pair[1] as f64);
            let base = class.basis(prev);
            (prev > 0.0 && cur > prev && base > 0.0)
                .then(|| (class.basis(cur) / base) / (cur / prev))
        })
        .collect();
    (!ratios.is_empty()).then(|| mean_or_zero(&ratios))
}

/// Growth rate of every (algorithm, shape) group next to the declared class
///
/// Groups below `config.min_samples_for_regression` samples, or without a
/// usable consecutive pair, are left out.
pub fn validate_growth(dataset: &Dataset, config: &AnalysisConfig) -> Vec<GrowthValidation> {
    let mut validations = Vec::new();

    for (algorithm, samples) in dataset.by_algorithm() {
        let declared = algorithms::find_routine(algorithm)
            .map(|routine| routine.time_complexity().to_string());
        let class = declared.as_deref().and_then(ComplexityClass::from_notation);

        for (shape, group) in group_in_order(samples.iter().copied(), |s| s.shape.as_str()) {
            if group.len() < config.min_samples_for_regression {
                continue;
            }
            let ratios = growth_ratios(&group);
            if ratios.is_empty() {
                continue;
            }
            let sizes: Vec<usize> = group.iter().map(|s| s.input_size).collect();
            validations.push(GrowthValidation {
                algorithm: algorithm.to_string(),
                shape: shape.to_string(),
                sample_count: group.len(),
                growth_rate: mean_or_zero(&ratios),
                declared: declared.clone(),
                expected_growth_rate: class.and_then(|c| class_growth_rate(c, &sizes)),
            });
        }
    }
    validations
}

/// Fit complexity models per algorithm on `config.complexity_shape` samples
pub fn analyze_complexity(dataset: &Dataset, config: &AnalysisConfig) -> Vec<AlgorithmComplexity> {
    let restricted: Dataset = dataset
        .with_shape(&config.complexity_shape)
        .cloned()
        .collect::<Vec<_>>()
        .into();

    restricted
        .by_algorithm()
        .into_iter()
        .filter(|(_, samples)| samples.len() >= config.min_samples_for_regression)
        .filter_map(|(algorithm, mut samples)| {
            samples.sort_by_key(|s| s.input_size);
            let sizes: Vec<f64> = samples.iter().map(|s| s.input_size as f64).collect();
            let times: Vec<f64> = samples.iter().map(|s| s.time_ns as f64).collect();
            let (best, models) = best_fit(&sizes, &times)?;
            Some(AlgorithmComplexity {
                algorithm: algorithm.to_string(),
                sample_count: samples.len(),
                best,
                models,
                growth_rate: growth_rate(&samples),
            })
        })
        .collect()
}
