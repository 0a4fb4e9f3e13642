// Configuration for the statistical analysis engine

use serde::{Deserialize, Serialize};

/// Thresholds and weights used by the analysis engine
///
/// # Example
/// ```
/// use sortbench::analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.z_score, 1.96); // 95% confidence
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Coefficient of variation (percent) above which an algorithm's
    /// execution times are flagged as highly variable
    ///
    /// Default: 50.0
    pub cv_threshold: f64,

    /// Normal critical value for the confidence interval half-width
    ///
    /// Default: 1.96 (95% two-sided)
    pub z_score: f64,

    /// F-statistic above which shape differences are reported as significant
    ///
    /// A rough constant rather than a table lookup. Default: 4.0
    pub f_critical: f64,

    /// Weight of the speed sub-score in the overall efficiency score
    pub speed_weight: f64,

    /// Weight of the memory sub-score in the overall efficiency score
    pub memory_weight: f64,

    /// Shape whose samples are used for complexity fitting
    ///
    /// Default: "Random"
    pub complexity_shape: String,

    /// Minimum samples for standard deviation and confidence intervals
    pub min_samples_for_stddev: usize,

    /// Minimum samples for regression fits
    pub min_samples_for_regression: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cv_threshold: 50.0,
            z_score: 1.96,
            f_critical: 4.0,
            speed_weight: 0.7,
            memory_weight: 0.3,
            complexity_shape: "Random".to_string(),
            min_samples_for_stddev: 2,
            min_samples_for_regression: 3,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cv_threshold <= 0.0 {
            return Err(format!(
                "cv_threshold must be positive, got {}",
                self.cv_threshold
            ));
        }

        if self.z_score <= 0.0 {
            return Err(format!("z_score must be positive, got {}", self.z_score));
        }

        if self.speed_weight < 0.0 || self.memory_weight < 0.0 {
            return Err("efficiency weights must be non-negative".to_string());
        }

        if (self.speed_weight + self.memory_weight - 1.0).abs() > 1e-9 {
            return Err(format!(
                "efficiency weights must sum to 1.0, got {}",
                self.speed_weight + self.memory_weight
            ));
        }

        if self.min_samples_for_stddev < 2 {
            return Err("min_samples_for_stddev must be >= 2".to_string());
        }

        if self.min_samples_for_regression < 3 {
            return Err("min_samples_for_regression must be >= 3".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.complexity_shape, "Random");
        assert_eq!(config.f_critical, 4.0);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = AnalysisConfig {
            speed_weight: 0.5,
            memory_weight: 0.3,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_regression_minimum_enforced() {
        let config = AnalysisConfig {
            min_samples_for_regression: 2,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
