// Warm-up, sampling and aggregation of one (routine, dataset) pair

use std::hint::black_box;
use std::thread;

use crate::algorithms::{is_sorted, SortRoutine};
use crate::counters::OpCounter;
use crate::error::{BenchError, Result};
use crate::measurement::clock::{Clock, MonotonicClock};
use crate::measurement::config::MeasurementConfig;
use crate::measurement::memory::{memory_delta, platform_probe, MemoryProbe};
use crate::sample::Sample;
use crate::stats;

/// Phase the protocol is currently in, reported to an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementPhase {
    WarmingUp,
    Sampling,
    Aggregating,
}

/// Raw result of one timed iteration; discarded after aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementRun {
    pub time_ns: u64,
    pub memory_bytes: Option<u64>,
    pub comparisons: u64,
    pub swaps: u64,
}

/// Converts one (routine, dataset) pair into a robust `Sample`
pub struct MeasurementProtocol {
    config: MeasurementConfig,
    probe: Box<dyn MemoryProbe>,
    clock: Box<dyn Clock>,
}

impl MeasurementProtocol {
    /// Protocol using the platform memory probe and a monotonic clock
    pub fn new(config: MeasurementConfig) -> Self {
        Self {
            config,
            probe: platform_probe(),
            clock: Box::new(MonotonicClock::new()),
        }
    }

    pub fn with_probe(mut self, probe: Box<dyn MemoryProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    /// Measure `routine` on `input`, labelling the sample with `shape`
    ///
    /// Never fails: iterations that error or corrupt their output are logged
    /// and discarded, and if none survive an all-zero sample is returned.
    pub fn measure(&self, routine: &dyn SortRoutine, input: &[i32], shape: &str) -> Sample {
        self.measure_observed(routine, input, shape, &mut |_| {})
    }

    /// Like [`measure`](Self::measure), reporting each phase to `observer`
    pub fn measure_observed(
        &self,
        routine: &dyn SortRoutine,
        input: &[i32],
        shape: &str,
        observer: &mut dyn FnMut(MeasurementPhase),
    ) -> Sample {
        observer(MeasurementPhase::WarmingUp);
        self.warm_up(routine, input);
        if self.config.settle_delay_ms > 0 {
            thread::sleep(self.config.settle_delay());
        }

        observer(MeasurementPhase::Sampling);
        let mut runs = Vec::with_capacity(self.config.measurement_iterations);
        for iteration in 0..self.config.measurement_iterations {
            match self.sample_once(routine, input, iteration) {
                Ok(run) => runs.push(run),
                Err(e) => tracing::warn!("Discarding iteration: {}", e),
            }
        }

        observer(MeasurementPhase::Aggregating);
        log_diagnostics(routine.name(), shape, input.len(), &runs);
        aggregate(routine.name(), shape, input.len(), &runs).unwrap_or_else(|| {
            let err = BenchError::MeasurementExhaustion {
                algorithm: routine.name().to_string(),
                shape: shape.to_string(),
                size: input.len(),
            };
            tracing::warn!("{}", err);
            // Zero delta when a probe exists, unavailable otherwise
            let memory = self.probe.is_available().then_some(0);
            Sample::empty(routine.name(), shape, input.len()).with_memory(memory)
        })
    }

    fn warm_up(&self, routine: &dyn SortRoutine, input: &[i32]) {
        for iteration in 0..self.config.warmup_iterations {
            let mut data = input.to_vec();
            let mut counter = OpCounter::new();
            if let Err(e) = routine.sort(black_box(&mut data), &mut counter) {
                tracing::warn!(
                    "Warm-up of {} stopped after {} iterations: {}",
                    routine.name(),
                    iteration,
                    e
                );
                return;
            }
            black_box(&data);
        }
    }

    fn sample_once(
        &self,
        routine: &dyn SortRoutine,
        input: &[i32],
        iteration: usize,
    ) -> Result<MeasurementRun> {
        if self.config.stabilization_delay_ms > 0 {
            thread::sleep(self.config.stabilization_delay());
        }

        let mut data = input.to_vec();
        let mut counter = OpCounter::new();

        self.probe.reclaim();
        let before = self.probe.resident_bytes();

        let start = self.clock.now_ns();
        let outcome = routine.sort(black_box(&mut data), &mut counter);
        let elapsed = self.clock.now_ns().saturating_sub(start);

        self.probe.reclaim();
        let after = self.probe.resident_bytes();

        outcome?;
        if !is_sorted(&data) {
            return Err(BenchError::Corruption {
                algorithm: routine.name().to_string(),
                iteration,
            });
        }

        let counts = counter.snapshot();
        Ok(MeasurementRun {
            time_ns: elapsed,
            memory_bytes: memory_delta(before, after),
            comparisons: counts.comparisons,
            swaps: counts.swaps,
        })
    }
}

/// Median of every metric over `runs`; `None` when `runs` is empty
///
/// Memory is the median of the runs that produced a reading, or `None` if
/// no run did.
pub fn aggregate(
    algorithm: &str,
    shape: &str,
    input_size: usize,
    runs: &[MeasurementRun],
) -> Option<Sample> {
    let times: Vec<u64> = runs.iter().map(|r| r.time_ns).collect();
    let memory: Vec<u64> = runs.iter().filter_map(|r| r.memory_bytes).collect();
    let comparisons: Vec<u64> = runs.iter().map(|r| r.comparisons).collect();
    let swaps: Vec<u64> = runs.iter().map(|r| r.swaps).collect();

    Some(Sample::new(
        algorithm,
        shape,
        input_size,
        stats::median_u64(&times)?,
        stats::median_u64(&memory),
        stats::median_u64(&comparisons)?,
        stats::median_u64(&swaps)?,
    ))
}

fn log_diagnostics(algorithm: &str, shape: &str, size: usize, runs: &[MeasurementRun]) {
    let times: Vec<f64> = runs.iter().map(|r| r.time_ns as f64).collect();
    if let (Some(mean), Some(sd)) = (stats::mean(&times), stats::sample_std_dev(&times)) {
        tracing::debug!(
            "{} on {} ({} elements): {} valid runs, mean {:.0} ns, std-dev {:.0} ns",
            algorithm,
            shape,
            size,
            runs.len(),
            mean,
            sd
        );
    }
}
