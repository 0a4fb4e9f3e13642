// Analysis report: runs every analysis over a dataset and renders the result

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::analysis::complexity::{
    analyze_complexity, validate_growth, AlgorithmComplexity, GrowthValidation,
};
use crate::analysis::confidence::{confidence_intervals, ConfidenceInterval};
use crate::analysis::config::AnalysisConfig;
use crate::analysis::efficiency::{efficiency_scores, EfficiencyScore};
use crate::analysis::quality::{
    check_completeness, check_consistency, CompletenessReport, ConsistencyReport,
};
use crate::analysis::summary::{describe, DescriptiveSummary};
use crate::analysis::variance::{anova_by_shape, variance_by_size, AnovaResult, SizeVariance};
use crate::error::Result;
use crate::sample::{Cell, Dataset};

/// Missing cells listed individually in the text report
const MAX_LISTED_MISSING: usize = 5;

/// Every derived metric of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Milliseconds since the Unix epoch
    pub generated_at_ms: u64,
    pub sample_count: usize,
    pub config: AnalysisConfig,
    pub completeness: CompletenessReport,
    pub consistency: ConsistencyReport,
    pub confidence: Vec<ConfidenceInterval>,
    pub complexity: Vec<AlgorithmComplexity>,
    /// Per (algorithm, shape) growth against the declared complexity
    pub growth: Vec<GrowthValidation>,
    pub anova: Option<AnovaResult>,
    pub size_variance: Vec<SizeVariance>,
    pub efficiency: Vec<EfficiencyScore>,
    pub summary: DescriptiveSummary,
}

/// Run every analysis over `dataset`
///
/// `expected` lists the cells the sweep was asked to produce. Nothing here
/// fails: groups below a metric's minimum sample count are left out.
pub fn analyze(dataset: &Dataset, expected: &[Cell], config: &AnalysisConfig) -> AnalysisReport {
    tracing::info!("Analyzing {} samples", dataset.len());

    let report = AnalysisReport {
        generated_at_ms: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default(),
        sample_count: dataset.len(),
        config: config.clone(),
        completeness: check_completeness(dataset, expected),
        consistency: check_consistency(dataset, config),
        confidence: confidence_intervals(dataset, config),
        complexity: analyze_complexity(dataset, config),
        growth: validate_growth(dataset, config),
        anova: anova_by_shape(dataset, config),
        size_variance: variance_by_size(dataset),
        efficiency: efficiency_scores(dataset, config),
        summary: describe(dataset),
    };

    if !report.completeness.is_complete() {
        tracing::warn!(
            "{} expected cells have no sample",
            report.completeness.missing.len()
        );
    }
    for flagged in report.consistency.flagged() {
        tracing::warn!(
            "High variability for {}: CV {:.1}%",
            flagged.algorithm,
            flagged.cv_percent
        );
    }
    for cell in &report.consistency.anomalies {
        tracing::warn!("No comparisons recorded for {}", cell);
    }

    report
}

fn ms(ns: f64) -> f64 {
    ns / 1_000_000.0
}

impl AnalysisReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "SORTING ALGORITHM STATISTICAL ANALYSIS")?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Dataset size: {} measurements", self.sample_count)?;
        writeln!(out)?;

        let c = &self.completeness;
        writeln!(out, "1. COMPLETENESS")?;
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(out, "Expected data points: {}", c.expected_count)?;
        writeln!(out, "Actual data points: {}", c.actual_count)?;
        writeln!(out, "Completeness: {:.1}%", c.completeness_percent)?;
        if c.is_complete() {
            writeln!(out, "All expected data combinations present")?;
        } else {
            writeln!(out, "Missing {} combinations:", c.missing.len())?;
            for cell in c.missing.iter().take(MAX_LISTED_MISSING) {
                writeln!(out, "  - {}", cell)?;
            }
            if c.missing.len() > MAX_LISTED_MISSING {
                writeln!(out, "  ... and {} more", c.missing.len() - MAX_LISTED_MISSING)?;
            }
        }
        writeln!(out)?;

        writeln!(out, "2. CONSISTENCY")?;
        writeln!(out, "{}", "-".repeat(30))?;
        for a in &self.consistency.algorithms {
            writeln!(
                out,
                "{:<15} {:>4} samples  mean {:>10.3} ms  CV {:>6.1}%{}",
                a.algorithm,
                a.sample_count,
                ms(a.mean_ns),
                a.cv_percent,
                if a.high_variability {
                    "  HIGH VARIABILITY"
                } else {
                    ""
                }
            )?;
        }
        if !self.consistency.anomalies.is_empty() {
            writeln!(out, "Operation count anomalies:")?;
            for cell in &self.consistency.anomalies {
                writeln!(out, "  - no comparisons recorded for {}", cell)?;
            }
        }
        writeln!(out)?;

        writeln!(out, "3. CONFIDENCE INTERVALS ({}σ)", self.config.z_score)?;
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(
            out,
            "{:<15} {:>12} {:>27} {:>12}",
            "Algorithm", "Mean(ms)", "CI(ms)", "StdDev(ms)"
        )?;
        for ci in &self.confidence {
            writeln!(
                out,
                "{:<15} {:>12.3} [{:>12.3}, {:>12.3}] {:>12.3}",
                ci.algorithm,
                ms(ci.mean),
                ms(ci.lower),
                ms(ci.upper),
                ms(ci.std_dev)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "4. COMPLEXITY MODELS ({} data)", self.config.complexity_shape)?;
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(
            out,
            "{:<15} {:<14} {:>8} {:>12}",
            "Algorithm", "Model", "R²", "Growth Rate"
        )?;
        for m in &self.complexity {
            writeln!(
                out,
                "{:<15} {:<14} {:>8.4} {:>12.2}",
                m.algorithm,
                m.best.class.to_string(),
                m.best.r_squared,
                m.growth_rate
            )?;
        }
        if !self.growth.is_empty() {
            writeln!(out)?;
            writeln!(out, "Growth by data type:")?;
        }
        for g in &self.growth {
            let declared = g.declared.as_deref().unwrap_or("Unknown");
            match g.expected_growth_rate {
                Some(expected) => writeln!(
                    out,
                    "  {} on {}: growth ratio = {:.2} (expected: {}, {:.2})",
                    g.algorithm, g.shape, g.growth_rate, declared, expected
                )?,
                None => writeln!(
                    out,
                    "  {} on {}: growth ratio = {:.2} (expected: {})",
                    g.algorithm, g.shape, g.growth_rate, declared
                )?,
            }
        }
        writeln!(out)?;

        writeln!(out, "5. VARIANCE ANALYSIS")?;
        writeln!(out, "{}", "-".repeat(30))?;
        match &self.anova {
            Some(anova) => {
                writeln!(out, "By data type ({} groups):", anova.groups)?;
                writeln!(out, "  F-statistic: {:.3}", anova.f_statistic)?;
                writeln!(out, "  Between-group variance: {:.2}", anova.ms_between)?;
                writeln!(out, "  Within-group variance: {:.2}", anova.ms_within)?;
                if anova.significant {
                    writeln!(out, "  Result: significant difference between data types")?;
                } else {
                    writeln!(out, "  Result: no significant difference between data types")?;
                }
            }
            None => writeln!(out, "By data type: not enough groups")?,
        }
        writeln!(out, "By input size:")?;
        writeln!(
            out,
            "  {:<10} {:>12} {:>12} {:>8}",
            "Size", "Mean(ms)", "StdDev(ms)", "CV(%)"
        )?;
        for v in &self.size_variance {
            writeln!(
                out,
                "  {:<10} {:>12.3} {:>12.3} {:>8.1}",
                v.input_size,
                ms(v.mean_ns),
                ms(v.std_dev_ns),
                v.cv_percent
            )?;
        }
        writeln!(out)?;

        writeln!(out, "6. EFFICIENCY SCORES")?;
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(
            out,
            "{:<15} {:>12} {:>12} {:>12} {:>6}",
            "Algorithm", "Speed", "Memory", "Overall", "Rank"
        )?;
        for s in &self.efficiency {
            writeln!(
                out,
                "{:<15} {:>12.1} {:>12.1} {:>12.1} {:>6}",
                s.algorithm, s.speed_score, s.memory_score, s.overall_score, s.rank
            )?;
        }
        writeln!(out)?;

        writeln!(out, "7. DESCRIPTIVE STATISTICS")?;
        writeln!(out, "{}", "-".repeat(30))?;
        for a in self.summary.fastest_first() {
            writeln!(
                out,
                "{:<15} min {:.3} ms  max {:.3} ms  mean {:.3} ms  median {:.3} ms ({} samples)",
                a.algorithm,
                ms(a.min_ns),
                ms(a.max_ns),
                ms(a.mean_ns),
                ms(a.median_ns),
                a.sample_count
            )?;
        }
        if let Some(cmp) = &self.summary.comparisons {
            writeln!(
                out,
                "Comparisons: min {}  max {}  mean {:.0}",
                cmp.min, cmp.max, cmp.mean
            )?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the text report to `path`
    pub fn write_text_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_report_string())?;
        tracing::info!("Statistical report saved: {}", path.display());
        Ok(())
    }

    /// Write the JSON report to `path`
    pub fn write_json_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("JSON report saved: {}", path.display());
        Ok(())
    }
}
