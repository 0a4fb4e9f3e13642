// Rough pre-run duration estimate (informational only)

use std::time::Duration;

use crate::algorithms::SortRoutine;
use crate::analysis::ComplexityClass;
use crate::measurement::MeasurementConfig;

/// Assumed cost of one basic operation
const NS_PER_OPERATION: f64 = 2.0;

/// Closed-form operation count guess for one sort of `n` elements
fn operations(class: Option<ComplexityClass>, n: usize) -> f64 {
    let n = n as f64;
    match class {
        Some(ComplexityClass::Quadratic) => n * n / 2.0,
        Some(ComplexityClass::Linearithmic) => n * n.max(2.0).log2(),
        Some(ComplexityClass::Linear) | None => n,
    }
}

/// Estimated wall time of a sweep, including the protocol's fixed pauses
pub fn estimate_duration(
    routines: &[Box<dyn SortRoutine>],
    shape_count: usize,
    sizes: &[usize],
    config: &MeasurementConfig,
) -> Duration {
    let runs_per_cell = (config.warmup_iterations + config.measurement_iterations) as f64;
    let pauses_per_cell = config.settle_delay().as_secs_f64()
        + config.measurement_iterations as f64 * config.stabilization_delay().as_secs_f64();

    let seconds: f64 = routines
        .iter()
        .map(|routine| {
            let class = ComplexityClass::from_notation(routine.time_complexity());
            sizes
                .iter()
                .map(|&n| {
                    let sort_secs = operations(class, n) * NS_PER_OPERATION / 1e9;
                    runs_per_cell * sort_secs + pauses_per_cell
                })
                .sum::<f64>()
        })
        .sum::<f64>()
        * shape_count as f64;

    Duration::from_secs_f64(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{BubbleSort, QuickSort};

    #[test]
    fn test_pauses_dominate_small_inputs() {
        let routines: Vec<Box<dyn SortRoutine>> = vec![Box::new(QuickSort)];
        let estimate = estimate_duration(&routines, 1, &[10], &MeasurementConfig::default());
        // 100 ms settle + 100 x 10 ms stabilization
        assert!(estimate >= Duration::from_millis(1_100));
        assert!(estimate < Duration::from_millis(1_200));
    }

    #[test]
    fn test_quadratic_costs_more() {
        let config = MeasurementConfig::quick();
        let quick: Vec<Box<dyn SortRoutine>> = vec![Box::new(QuickSort)];
        let bubble: Vec<Box<dyn SortRoutine>> = vec![Box::new(BubbleSort)];
        let sizes = [1_000, 10_000];
        assert!(
            estimate_duration(&bubble, 5, &sizes, &config)
                > estimate_duration(&quick, 5, &sizes, &config)
        );
    }

    #[test]
    fn test_scales_with_shape_count() {
        let config = MeasurementConfig::default();
        let routines: Vec<Box<dyn SortRoutine>> = vec![Box::new(QuickSort)];
        let one = estimate_duration(&routines, 1, &[100], &config);
        let five = estimate_duration(&routines, 5, &[100], &config);
        assert!((five.as_secs_f64() - 5.0 * one.as_secs_f64()).abs() < 1e-6);
    }
}
