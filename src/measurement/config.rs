// Configuration for the warm-up/sampling protocol

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Iteration counts and pauses used by the measurement protocol
///
/// # Example
/// ```
/// use sortbench::measurement::MeasurementConfig;
///
/// let config = MeasurementConfig::default();
/// assert_eq!(config.warmup_iterations, 1_000);
/// assert_eq!(config.measurement_iterations, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Untimed runs that bring caches, branch predictors and CPU frequency
    /// into steady state before sampling
    pub warmup_iterations: usize,

    /// Timed, independently validated runs aggregated into one sample
    pub measurement_iterations: usize,

    /// Blocking pause before every timed run, in milliseconds
    pub stabilization_delay_ms: u64,

    /// Blocking pause between warm-up and sampling, in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 1_000,
            measurement_iterations: 100,
            stabilization_delay_ms: 10,
            settle_delay_ms: 100,
        }
    }
}

impl MeasurementConfig {
    /// Small, pause-free configuration for smoke runs and tests
    pub fn quick() -> Self {
        Self {
            warmup_iterations: 10,
            measurement_iterations: 5,
            stabilization_delay_ms: 0,
            settle_delay_ms: 0,
        }
    }

    pub fn stabilization_delay(&self) -> Duration {
        Duration::from_millis(self.stabilization_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.measurement_iterations == 0 {
            return Err("measurement_iterations must be >= 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeasurementConfig::default();
        assert_eq!(config.stabilization_delay(), Duration::from_millis(10));
        assert_eq!(config.settle_delay(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_config() {
        let config = MeasurementConfig::quick();
        assert_eq!(config.measurement_iterations, 5);
        assert_eq!(config.stabilization_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_zero_iterations_invalid() {
        let mut config = MeasurementConfig::default();
        config.measurement_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MeasurementConfig = toml::from_str("warmup_iterations = 5").unwrap();
        assert_eq!(config.warmup_iterations, 5);
        assert_eq!(config.measurement_iterations, 100);
    }
}
