// Tests for the statistical analysis engine
//
// Datasets are built by hand so every expected value can be checked on paper.

use super::*;
use crate::sample::{Cell, Dataset, Sample};

fn sample(algorithm: &str, shape: &str, size: usize, time_ns: u64) -> Sample {
    Sample::new(algorithm, shape, size, time_ns, Some(1024), 10, 5)
}

fn dataset(samples: Vec<Sample>) -> Dataset {
    Dataset::from(samples)
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

// ---------------------------------------------------------------- quality

#[test]
fn test_completeness_reports_exact_missing_cell() {
    let expected = vec![Cell::new("A", "Random", 10), Cell::new("A", "Random", 20)];
    let data = dataset(vec![sample("A", "Random", 10, 100)]);

    let report = check_completeness(&data, &expected);

    assert_eq!(report.missing, vec![Cell::new("A", "Random", 20)]);
    assert_eq!(report.expected_count, 2);
    assert_eq!(report.actual_count, 1);
    assert!(close(report.completeness_percent, 50.0, 1e-9));
    assert!(!report.is_complete());
}

#[test]
fn test_completeness_full_matrix() {
    let expected = vec![Cell::new("A", "Random", 10), Cell::new("B", "Random", 10)];
    let data = dataset(vec![
        sample("B", "Random", 10, 100),
        sample("A", "Random", 10, 100),
    ]);
    let report = check_completeness(&data, &expected);
    assert!(report.is_complete());
    assert!(close(report.completeness_percent, 100.0, 1e-9));
}

#[test]
fn test_consistency_flags_noisy_algorithm() {
    let data = dataset(vec![
        sample("Stable", "Random", 100, 100),
        sample("Stable", "Random", 100, 100),
        sample("Stable", "Random", 100, 100),
        sample("Stable", "Random", 100, 100),
        sample("Noisy", "Random", 100, 10),
        sample("Noisy", "Random", 100, 200),
        sample("Noisy", "Random", 100, 5),
        sample("Noisy", "Random", 100, 300),
    ]);
    let report = check_consistency(&data, &AnalysisConfig::default());

    assert_eq!(report.algorithms.len(), 2);
    assert_eq!(report.algorithms[0].algorithm, "Stable");
    assert!(!report.algorithms[0].high_variability);
    assert!(report.algorithms[0].cv_percent < 1.0);

    let noisy = &report.algorithms[1];
    assert!(noisy.high_variability);
    assert!(noisy.cv_percent > 90.0 && noisy.cv_percent < 105.0);

    let flagged: Vec<&str> = report.flagged().map(|a| a.algorithm.as_str()).collect();
    assert_eq!(flagged, vec!["Noisy"]);
}

#[test]
fn test_consistency_lists_operation_anomalies() {
    let exhausted = Sample::empty("Broken", "Sorted", 200);
    let data = dataset(vec![sample("A", "Random", 100, 50), exhausted]);

    let report = check_consistency(&data, &AnalysisConfig::default());
    assert_eq!(report.anomalies, vec![Cell::new("Broken", "Sorted", 200)]);
}

// ------------------------------------------------------------- confidence

#[test]
fn test_confidence_interval_values() {
    let data = dataset(vec![
        sample("A", "Random", 100, 100),
        sample("A", "Random", 200, 200),
        sample("A", "Random", 400, 300),
    ]);
    let intervals = confidence_intervals(&data, &AnalysisConfig::default());
    assert_eq!(intervals.len(), 1);

    let ci = &intervals[0];
    // mean 200, s = 100, se = 100 / sqrt(3)
    let margin = 1.96 * 100.0 / 3.0f64.sqrt();
    assert!(close(ci.mean, 200.0, 1e-9));
    assert!(close(ci.std_dev, 100.0, 1e-9));
    assert!(close(ci.lower, 200.0 - margin, 1e-9));
    assert!(close(ci.upper, 200.0 + margin, 1e-9));
}

#[test]
fn test_confidence_interval_brackets_mean_and_skips_single_sample() {
    let data = dataset(vec![
        sample("A", "Random", 100, 120),
        sample("A", "Sorted", 100, 80),
        sample("A", "NearlySorted", 100, 95),
        sample("B", "Random", 100, 999),
        sample("C", "Random", 100, 7),
        sample("C", "Random", 200, 7),
    ]);
    let intervals = confidence_intervals(&data, &AnalysisConfig::default());

    let names: Vec<&str> = intervals.iter().map(|c| c.algorithm.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    for ci in &intervals {
        assert!(ci.lower <= ci.mean && ci.mean <= ci.upper);
        assert!(ci.contains(ci.mean));
    }
    // Identical times collapse the interval onto the mean
    assert_eq!(intervals[1].lower, intervals[1].upper);
}

// ------------------------------------------------------------- complexity

#[test]
fn test_notation_parsing() {
    assert_eq!(
        ComplexityClass::from_notation("O(n²)"),
        Some(ComplexityClass::Quadratic)
    );
    assert_eq!(
        ComplexityClass::from_notation("O(n^2)"),
        Some(ComplexityClass::Quadratic)
    );
    assert_eq!(
        ComplexityClass::from_notation("O(n log n)"),
        Some(ComplexityClass::Linearithmic)
    );
    assert_eq!(
        ComplexityClass::from_notation("O(n)"),
        Some(ComplexityClass::Linear)
    );
    assert_eq!(ComplexityClass::from_notation("O(1)"), None);
}

#[test]
fn test_quadratic_data_fits_quadratic() {
    let sizes = [100.0, 200.0, 400.0, 600.0, 800.0, 1000.0];
    let times: Vec<f64> = sizes.iter().map(|n| 3.0 * n * n).collect();

    let (best, models) = best_fit(&sizes, &times).unwrap();
    assert_eq!(best.class, ComplexityClass::Quadratic);
    assert!(close(best.coefficient, 3.0, 1e-9));
    assert!(close(best.r_squared, 1.0, 1e-12));
    assert_eq!(models.len(), 3);
    assert_eq!(models[0].class, ComplexityClass::Linear);
}

#[test]
fn test_linear_fit_has_intercept() {
    let sizes = [10.0, 20.0, 30.0, 40.0];
    let times: Vec<f64> = sizes.iter().map(|n| 5.0 * n + 1000.0).collect();

    let model = fit_linear(&sizes, &times).unwrap();
    assert!(close(model.coefficient, 5.0, 1e-9));
    assert!(close(model.intercept, 1000.0, 1e-6));
    assert!(close(model.r_squared, 1.0, 1e-12));
    assert!(close(model.predict(50.0), 1250.0, 1e-6));
}

#[test]
fn test_linearithmic_data_beats_linear() {
    let data = dataset(
        [100usize, 200, 400]
            .iter()
            .map(|&n| {
                let nf = n as f64;
                sample("Quick Sort", "Random", n, (1000.0 * nf * nf.ln()).round() as u64)
            })
            .collect(),
    );
    let results = analyze_complexity(&data, &AnalysisConfig::default());
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.best.class, ComplexityClass::Linearithmic);
    let linear = result.models[0];
    assert!(linear.r_squared < result.best.r_squared);
}

#[test]
fn test_complexity_restricted_to_configured_shape_and_minimum() {
    let data = dataset(vec![
        sample("A", "Random", 100, 10),
        sample("A", "Random", 200, 20),
        sample("A", "Sorted", 400, 40),
        sample("B", "Sorted", 100, 10),
        sample("B", "Sorted", 200, 20),
        sample("B", "Sorted", 400, 40),
    ]);
    assert!(analyze_complexity(&data, &AnalysisConfig::default()).is_empty());

    let sorted = AnalysisConfig {
        complexity_shape: "Sorted".to_string(),
        ..AnalysisConfig::default()
    };
    let results = analyze_complexity(&data, &sorted);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].algorithm, "B");
    assert_eq!(results[0].best.class, ComplexityClass::Linear);
}

#[test]
fn test_growth_rate_quadratic_doubling() {
    let samples = [
        sample("A", "Random", 400, 1600),
        sample("A", "Random", 100, 100),
        sample("A", "Random", 200, 400),
    ];
    let refs: Vec<&Sample> = samples.iter().collect();
    assert!(close(growth_rate(&refs), 2.0, 1e-12));
}

#[test]
fn test_growth_rate_skips_degenerate_pairs() {
    let samples = [
        sample("A", "Random", 100, 0),
        sample("A", "Random", 200, 400),
        sample("A", "Random", 200, 500),
        sample("A", "Random", 400, 800),
    ];
    let refs: Vec<&Sample> = samples.iter().collect();
    // Only (200, 500) -> (400, 800) qualifies: (800 / 500) / 2
    assert!(close(growth_rate(&refs), 0.8, 1e-12));
    assert_eq!(growth_rate(&refs[..1]), 0.0);
}

#[test]
fn test_growth_validated_per_shape_against_declared_class() {
    let data = dataset(vec![
        sample("Bubble Sort", "Random", 100, 10_000),
        sample("Bubble Sort", "Random", 200, 40_000),
        sample("Bubble Sort", "Random", 400, 160_000),
        sample("Bubble Sort", "Sorted", 100, 100),
        sample("Bubble Sort", "Sorted", 200, 200),
        sample("Heap Sort", "Sorted", 100, 1_000),
        sample("Heap Sort", "Sorted", 200, 2_300),
        sample("Heap Sort", "Sorted", 400, 5_200),
        sample("Custom", "Random", 100, 100),
        sample("Custom", "Random", 200, 200),
        sample("Custom", "Random", 400, 400),
    ]);
    let rows = validate_growth(&data, &AnalysisConfig::default());

    let groups: Vec<(&str, &str)> = rows
        .iter()
        .map(|g| (g.algorithm.as_str(), g.shape.as_str()))
        .collect();
    // Bubble Sort on Sorted has only two sizes
    assert_eq!(
        groups,
        vec![
            ("Bubble Sort", "Random"),
            ("Heap Sort", "Sorted"),
            ("Custom", "Random")
        ]
    );

    let bubble = &rows[0];
    assert_eq!(bubble.declared.as_deref(), Some("O(n²)"));
    assert!(close(bubble.growth_rate, 2.0, 1e-12));
    assert!(close(bubble.expected_growth_rate.unwrap(), 2.0, 1e-12));

    let heap = &rows[1];
    assert_eq!(heap.declared.as_deref(), Some("O(n log n)"));
    assert!(close(heap.growth_rate, (1.15 + 5.2 / 2.3 / 2.0) / 2.0, 1e-12));
    let expected = (200f64.ln() / 100f64.ln() + 400f64.ln() / 200f64.ln()) / 2.0;
    assert!(close(heap.expected_growth_rate.unwrap(), expected, 1e-12));

    let custom = &rows[2];
    assert_eq!(custom.declared, None);
    assert_eq!(custom.expected_growth_rate, None);
    assert!(close(custom.growth_rate, 1.0, 1e-12));
}

// --------------------------------------------------------------- variance

#[test]
fn test_anova_by_shape() {
    let data = dataset(vec![
        sample("A", "Random", 100, 10),
        sample("A", "Random", 100, 12),
        sample("A", "Random", 100, 14),
        sample("A", "Sorted", 100, 1),
        sample("A", "Sorted", 100, 2),
        sample("A", "Sorted", 100, 3),
    ]);
    let anova = anova_by_shape(&data, &AnalysisConfig::default()).unwrap();

    assert_eq!(anova.groups, 2);
    assert_eq!(anova.observations, 6);
    assert!(close(anova.grand_mean, 7.0, 1e-9));
    assert!(close(anova.ss_between, 150.0, 1e-9));
    assert!(close(anova.ss_within, 10.0, 1e-9));
    assert!(close(anova.f_statistic, 60.0, 1e-9));
    assert!(anova.significant);
}

#[test]
fn test_anova_skipped_without_enough_data() {
    let config = AnalysisConfig::default();
    let one_shape = dataset(vec![
        sample("A", "Random", 100, 10),
        sample("A", "Random", 200, 20),
    ]);
    assert!(anova_by_shape(&one_shape, &config).is_none());

    let one_each = dataset(vec![
        sample("A", "Random", 100, 10),
        sample("A", "Sorted", 100, 20),
    ]);
    assert!(anova_by_shape(&one_each, &config).is_none());
}

#[test]
fn test_variance_by_size_ascending() {
    let data = dataset(vec![
        sample("A", "Random", 200, 30),
        sample("A", "Random", 100, 10),
        sample("B", "Random", 200, 50),
    ]);
    let rows = variance_by_size(&data);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].input_size, 100);
    assert_eq!(rows[0].std_dev_ns, 0.0);
    assert_eq!(rows[1].input_size, 200);
    assert!(close(rows[1].mean_ns, 40.0, 1e-9));
    // s = sqrt(((30-40)^2 + (50-40)^2) / 1)
    assert!(close(rows[1].std_dev_ns, 200.0f64.sqrt(), 1e-9));
    assert!(close(rows[1].cv_percent, 200.0f64.sqrt() / 40.0 * 100.0, 1e-9));
}

// ------------------------------------------------------------- efficiency

fn with_memory(algorithm: &str, time_ns: u64, memory: Option<u64>) -> Sample {
    Sample::new(algorithm, "Random", 100, time_ns, memory, 10, 5)
}

#[test]
fn test_efficiency_scores_weighted() {
    let data = dataset(vec![
        with_memory("Fast", 100, Some(1000)),
        with_memory("Lean", 200, Some(500)),
    ]);
    let scores = efficiency_scores(&data, &AnalysisConfig::default());

    assert_eq!(scores[0].algorithm, "Fast");
    assert_eq!(scores[0].rank, 1);
    assert!(close(scores[0].speed_score, 100.0, 1e-9));
    assert!(close(scores[0].memory_score, 50.0, 1e-9));
    assert!(close(scores[0].overall_score, 85.0, 1e-9));

    assert_eq!(scores[1].algorithm, "Lean");
    assert_eq!(scores[1].rank, 2);
    assert!(close(scores[1].overall_score, 65.0, 1e-9));
}

#[test]
fn test_efficiency_ties_keep_input_order() {
    let data = dataset(vec![
        with_memory("Second", 100, Some(1000)),
        with_memory("First", 100, Some(1000)),
        with_memory("Slow", 400, Some(1000)),
    ]);
    let scores = efficiency_scores(&data, &AnalysisConfig::default());
    let order: Vec<(&str, usize)> = scores
        .iter()
        .map(|s| (s.algorithm.as_str(), s.rank))
        .collect();
    assert_eq!(order, vec![("Second", 1), ("First", 2), ("Slow", 3)]);
}

#[test]
fn test_efficiency_unavailable_memory_scores_full() {
    let data = dataset(vec![
        with_memory("A", 100, None),
        with_memory("B", 300, Some(0)),
    ]);
    let scores = efficiency_scores(&data, &AnalysisConfig::default());
    for score in &scores {
        assert_eq!(score.memory_score, 100.0);
        assert_eq!(score.mean_memory_bytes, None);
    }
    assert!(close(scores[1].speed_score, 100.0 / 3.0, 1e-9));
}

#[test]
fn test_efficiency_exhausted_algorithm_ranks_last() {
    let data = dataset(vec![
        Sample::empty("Broken", "Random", 100),
        Sample::empty("Broken", "Random", 200),
        with_memory("Quick", 1000, Some(1000)),
        with_memory("Merge", 2000, Some(1000)),
    ]);
    let scores = efficiency_scores(&data, &AnalysisConfig::default());
    let order: Vec<(&str, usize)> = scores
        .iter()
        .map(|s| (s.algorithm.as_str(), s.rank))
        .collect();
    assert_eq!(order, vec![("Quick", 1), ("Merge", 2), ("Broken", 3)]);

    // The exhausted algorithm does not take part in normalization
    assert!(close(scores[0].speed_score, 100.0, 1e-9));
    assert!(close(scores[1].speed_score, 50.0, 1e-9));
    assert!(close(scores[1].overall_score, 65.0, 1e-9));

    let broken = &scores[2];
    assert!(!broken.measured);
    assert_eq!(broken.speed_score, 0.0);
    assert_eq!(broken.overall_score, 0.0);
}

// ------------------------------------------------------- summary & report

#[test]
fn test_describe_per_algorithm() {
    let data = dataset(vec![
        sample("A", "Random", 100, 100),
        sample("A", "Random", 200, 300),
        sample("A", "Random", 400, 200),
        sample("B", "Random", 100, 50),
    ]);
    let summary = describe(&data);

    let a = &summary.algorithms[0];
    assert_eq!(a.sample_count, 3);
    assert_eq!(a.min_ns, 100.0);
    assert_eq!(a.max_ns, 300.0);
    assert!(close(a.mean_ns, 200.0, 1e-9));
    assert!(close(a.median_ns, 200.0, 1e-3));

    let fastest: Vec<&str> = summary
        .fastest_first()
        .iter()
        .map(|s| s.algorithm.as_str())
        .collect();
    assert_eq!(fastest, vec!["B", "A"]);

    let comparisons = summary.comparisons.unwrap();
    assert_eq!((comparisons.min, comparisons.max), (10, 10));
}

#[test]
fn test_empty_dataset_analysis_does_not_fail() {
    let report = analyze(
        &Dataset::new(),
        &[Cell::new("A", "Random", 10)],
        &AnalysisConfig::default(),
    );
    assert_eq!(report.sample_count, 0);
    assert_eq!(report.completeness.missing.len(), 1);
    assert!(report.efficiency.is_empty());
    assert!(report.anova.is_none());
    assert!(report.summary.comparisons.is_none());
}

#[test]
fn test_report_text_and_json() {
    let data = dataset(vec![
        sample("Quick Sort", "Random", 100, 1_000),
        sample("Quick Sort", "Random", 200, 2_300),
        sample("Quick Sort", "Random", 400, 5_200),
        sample("Quick Sort", "Sorted", 100, 900),
        sample("Quick Sort", "Sorted", 200, 2_000),
        sample("Bubble Sort", "Random", 100, 10_000),
    ]);
    let expected = vec![
        Cell::new("Quick Sort", "Random", 100),
        Cell::new("Bubble Sort", "Random", 800),
    ];
    let report = analyze(&data, &expected, &AnalysisConfig::default());

    let text = report.to_report_string();
    assert!(text.contains("1. COMPLETENESS"));
    assert!(text.contains("Bubble Sort on Random (800 elements)"));
    assert!(text.contains("6. EFFICIENCY SCORES"));
    assert!(text.contains("Quick Sort"));
    assert!(text.contains(
        "Quick Sort on Random: growth ratio = 1.14 (expected: O(n log n), 1.14)"
    ));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["sample_count"], 6);
    assert_eq!(json["growth"].as_array().unwrap().len(), 1);
    assert_eq!(json["growth"][0]["declared"], "O(n log n)");
    assert_eq!(json["efficiency"][0]["rank"], 1);
    assert_eq!(json["completeness"]["missing"][0]["input_size"], 800);
}

#[test]
fn test_report_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let report = analyze(
        &dataset(vec![sample("A", "Random", 100, 10)]),
        &[],
        &AnalysisConfig::default(),
    );
    let text_path = dir.path().join("report.txt");
    let json_path = dir.path().join("report.json");
    report.write_text_file(&text_path).unwrap();
    report.write_json_file(&json_path).unwrap();
    assert!(std::fs::read_to_string(text_path)
        .unwrap()
        .starts_with("SORTING ALGORITHM STATISTICAL ANALYSIS"));
    assert!(json_path.exists());
}
