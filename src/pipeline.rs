//! Pipeline lifecycle tracking and the end-to-end benchmark driver
//!
//! A benchmark run moves forward through
//! `Idle -> WarmingUp -> Sampling -> Aggregating -> SweepAssembling ->
//! Persisted -> Analyzing -> Reported`. The only loop is
//! `Aggregating -> WarmingUp` when the sweep moves on to the next cell.
//! Any state except `Failed` may move to `Failed`, which is terminal.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::analysis::{analyze, AnalysisConfig, AnalysisReport};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::measurement::{MeasurementPhase, MeasurementProtocol};
use crate::sample::{Cell, Dataset};
use crate::storage;
use crate::sweep::{CellFailure, Orchestrator, SweepArtifacts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Idle,
    WarmingUp,
    Sampling,
    Aggregating,
    SweepAssembling,
    Persisted,
    Analyzing,
    Reported,
    Failed,
}

impl PipelineState {
    /// Whether `self -> to` is a legal transition
    pub fn can_transition_to(self, to: PipelineState) -> bool {
        use PipelineState::{
            Aggregating, Analyzing, Failed, Idle, Persisted, Reported, Sampling,
            SweepAssembling, WarmingUp,
        };
        matches!(
            (self, to),
            (Idle, WarmingUp)
                | (WarmingUp, Sampling)
                | (Sampling, Aggregating)
                | (Aggregating, WarmingUp)
                | (Aggregating, SweepAssembling)
                // every cell of the sweep failed before measurement
                | (Idle, SweepAssembling)
                | (SweepAssembling, Persisted)
                | (Persisted, Analyzing)
                | (Idle, Analyzing)
                | (Analyzing, Reported)
        ) || (to == Failed && self != Failed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Reported | PipelineState::Failed)
    }
}

impl From<MeasurementPhase> for PipelineState {
    fn from(phase: MeasurementPhase) -> Self {
        match phase {
            MeasurementPhase::WarmingUp => PipelineState::WarmingUp,
            MeasurementPhase::Sampling => PipelineState::Sampling,
            MeasurementPhase::Aggregating => PipelineState::Aggregating,
        }
    }
}

/// Current pipeline state plus every state visited so far
#[derive(Debug, Clone)]
pub struct PipelineTracker {
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl Default for PipelineTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineTracker {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    /// Move to `to`, rejecting illegal transitions
    pub fn transition(&mut self, to: PipelineState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(BenchError::State {
                from: self.state,
                to,
            });
        }
        tracing::trace!("Pipeline {:?} -> {:?}", self.state, to);
        self.state = to;
        self.history.push(to);
        Ok(())
    }

    /// Enter the terminal `Failed` state (no-op if already failed)
    pub fn fail(&mut self) {
        if self.state != PipelineState::Failed {
            tracing::debug!("Pipeline {:?} -> Failed", self.state);
            self.state = PipelineState::Failed;
            self.history.push(PipelineState::Failed);
        }
    }
}

/// Everything a completed benchmark run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    pub dataset: Dataset,
    pub failures: Vec<CellFailure>,
    pub artifacts: SweepArtifacts,
    pub report: AnalysisReport,
    pub report_path: PathBuf,
    pub json_path: PathBuf,
    pub final_state: PipelineState,
}

/// A fatal error together with the terminal pipeline state it produced
#[derive(Debug, Error)]
#[error("Pipeline failed during {failed_in:?}")]
pub struct PipelineFailure {
    /// State the pipeline was in when the error occurred
    pub failed_in: PipelineState,
    /// Terminal state after the failure (always `Failed`)
    pub final_state: PipelineState,
    pub history: Vec<PipelineState>,
    #[source]
    pub source: BenchError,
}

impl PipelineFailure {
    /// Move `tracker` to `Failed` and capture its lifecycle with `source`
    fn record(tracker: &mut PipelineTracker, source: BenchError) -> Self {
        let failed_in = tracker.state();
        tracker.fail();
        tracing::error!("Pipeline failed during {:?}: {}", failed_in, source);
        Self {
            failed_in,
            final_state: tracker.state(),
            history: tracker.history().to_vec(),
            source,
        }
    }
}

/// Sweep, persist, analyze and report in one run
///
/// Only configuration, filesystem and state errors abort the run; the
/// pipeline is then left in `Failed`, which is returned with the error.
pub fn run_benchmark(
    config: &BenchConfig,
    protocol: MeasurementProtocol,
) -> std::result::Result<PipelineOutcome, PipelineFailure> {
    let mut orchestrator = Orchestrator::new(protocol);
    execute(&mut orchestrator, config)
        .map_err(|e| PipelineFailure::record(orchestrator.tracker_mut(), e))
}

fn execute(orchestrator: &mut Orchestrator, config: &BenchConfig) -> Result<PipelineOutcome> {
    config.validate()?;
    let routines = config.matrix.resolve_routines()?;

    let sweep = orchestrator.run_sweep(&routines, &config.matrix.shapes, &config.matrix.sizes)?;
    let artifacts = orchestrator.persist(&sweep.dataset, &config.output_dir)?;

    let tracker = orchestrator.tracker_mut();
    tracker.transition(PipelineState::Analyzing)?;
    let report = analyze(
        &sweep.dataset,
        &config.matrix.expected_cells(),
        &config.analysis,
    );
    let report_path = config
        .output_dir
        .join(format!("statistical_report_{}.txt", artifacts.timestamp));
    let json_path = config
        .output_dir
        .join(format!("statistical_report_{}.json", artifacts.timestamp));
    report.write_text_file(&report_path)?;
    report.write_json_file(&json_path)?;
    tracker.transition(PipelineState::Reported)?;

    Ok(PipelineOutcome {
        dataset: sweep.dataset,
        failures: sweep.failures,
        artifacts,
        report,
        report_path,
        json_path,
        final_state: tracker.state(),
    })
}

/// Analyze a previously persisted sample file (`Idle -> Analyzing -> Reported`)
pub fn analyze_file(
    path: &std::path::Path,
    expected: &[Cell],
    config: &AnalysisConfig,
) -> std::result::Result<AnalysisReport, PipelineFailure> {
    let mut tracker = PipelineTracker::new();
    let result = tracker
        .transition(PipelineState::Analyzing)
        .and_then(|_| storage::load(path))
        .map(|dataset| analyze(&dataset, expected, config))
        .and_then(|report| {
            tracker.transition(PipelineState::Reported)?;
            Ok(report)
        });
    result.map_err(|e| PipelineFailure::record(&mut tracker, e))
}
