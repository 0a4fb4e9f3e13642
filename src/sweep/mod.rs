// Test matrix orchestration
//
// Enumerates {algorithm x data shape x size}, generates each dataset
// deterministically, runs the measurement protocol per cell and assembles the
// resulting samples. Cells fail independently: a failing cell is logged and
// recorded while the sweep carries on. The sweep is strictly sequential so
// measurements never compete for the CPU.

mod estimate;
mod matrix;
mod orchestrator;
mod persist;

pub use estimate::estimate_duration;
pub use matrix::{TestMatrix, DEFAULT_SIZES};
pub use orchestrator::{CellFailure, Orchestrator, SweepOutcome};
pub use persist::{persist_results, summary_text, SweepArtifacts};
