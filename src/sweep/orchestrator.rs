// Sequential sweep over the test matrix

use std::path::Path;
use std::time::Instant;

use crate::algorithms::SortRoutine;
use crate::error::{BenchError, Result};
use crate::generator;
use crate::measurement::MeasurementProtocol;
use crate::pipeline::{PipelineState, PipelineTracker};
use crate::sample::{Cell, Dataset, Sample};
use crate::sweep::estimate::estimate_duration;
use crate::sweep::persist::{persist_results, SweepArtifacts};

/// Execution time above which a sample is reported as suspiciously slow
const SLOW_SAMPLE_NS: u64 = 60_000_000_000;

/// A cell that produced no sample
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    pub cell: Cell,
    pub reason: String,
}

/// Samples and per-cell failures of one sweep
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    pub dataset: Dataset,
    pub failures: Vec<CellFailure>,
}

/// Drives the measurement protocol over every cell of the matrix
pub struct Orchestrator {
    protocol: MeasurementProtocol,
    tracker: PipelineTracker,
}

impl Orchestrator {
    pub fn new(protocol: MeasurementProtocol) -> Self {
        Self {
            protocol,
            tracker: PipelineTracker::new(),
        }
    }

    pub fn tracker(&self) -> &PipelineTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut PipelineTracker {
        &mut self.tracker
    }

    /// Measure every (routine, shape, size) cell, in that nesting order
    ///
    /// A failing cell is logged and recorded in `SweepOutcome::failures`; the
    /// sweep continues. Only an illegal pipeline transition aborts it.
    pub fn run_sweep(
        &mut self,
        routines: &[Box<dyn SortRoutine>],
        shapes: &[String],
        sizes: &[usize],
    ) -> Result<SweepOutcome> {
        let total = routines.len() * shapes.len() * sizes.len();
        log_environment();
        tracing::info!("Total tests to execute: {}", total);
        tracing::info!(
            "Estimated completion time: {:.1} minutes",
            estimate_duration(routines, shapes.len(), sizes, self.protocol.config()).as_secs_f64()
                / 60.0
        );

        let started = Instant::now();
        let mut outcome = SweepOutcome::default();
        let mut completed = 0usize;

        for routine in routines {
            for shape in shapes {
                for &size in sizes {
                    let cell = Cell::new(routine.name(), shape, size);
                    match self.run_cell(routine.as_ref(), shape, size) {
                        Ok(sample) => {
                            sanity_check(&sample);
                            outcome.dataset.push(sample);
                            completed += 1;
                            tracing::info!(
                                "Progress: {:.1}% ({}/{} tests completed)",
                                completed as f64 / total as f64 * 100.0,
                                completed,
                                total
                            );
                        }
                        Err(e @ BenchError::State { .. }) => return Err(e),
                        Err(e) => {
                            tracing::warn!("Test failed: {} - {}", cell, e);
                            outcome.failures.push(CellFailure {
                                cell,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        self.tracker.transition(PipelineState::SweepAssembling)?;
        tracing::info!(
            "Sweep completed in {:.2} seconds: {} samples, {} failed cells",
            started.elapsed().as_secs_f64(),
            outcome.dataset.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    fn run_cell(&mut self, routine: &dyn SortRoutine, shape: &str, size: usize) -> Result<Sample> {
        let input = generator::generate(shape, size)?;
        if input.len() != size {
            return Err(BenchError::Generation(format!(
                "{} generator produced {} elements, expected {}",
                shape,
                input.len(),
                size
            )));
        }

        let tracker = &mut self.tracker;
        let mut phase_error = None;
        let sample = self
            .protocol
            .measure_observed(routine, &input, shape, &mut |phase| {
                if phase_error.is_none() {
                    phase_error = tracker.transition(phase.into()).err();
                }
            });

        match phase_error {
            Some(e) => Err(e),
            None => Ok(sample),
        }
    }

    /// Write the sample file and summary into `dir`
    ///
    /// Failure to create `dir` or write either file is fatal.
    pub fn persist(&mut self, dataset: &Dataset, dir: &Path) -> Result<SweepArtifacts> {
        let artifacts = persist_results(dataset, dir)?;
        self.tracker.transition(PipelineState::Persisted)?;
        Ok(artifacts)
    }
}

fn log_environment() {
    tracing::info!(
        "Benchmarking environment: {} {}, {} available processors",
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    );
}

/// Post-cell plausibility checks; warnings only
fn sanity_check(sample: &Sample) {
    if sample.has_operation_anomaly() {
        tracing::warn!(
            "No comparisons recorded for {} on {} elements",
            sample.algorithm,
            sample.input_size
        );
    }

    let size = sample.input_size as u64;
    if sample.swaps > size.saturating_mul(size) {
        tracing::warn!(
            "Excessive swaps {} for {} on {} elements",
            sample.swaps,
            sample.algorithm,
            sample.input_size
        );
    }

    if sample.time_ns > SLOW_SAMPLE_NS {
        tracing::warn!(
            "Very slow execution time {:.2}ms for {} on {} elements",
            sample.time_ms(),
            sample.algorithm,
            sample.input_size
        );
    }
}
