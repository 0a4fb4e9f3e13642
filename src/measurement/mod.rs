// Measurement protocol for one (sort routine, dataset) pair
//
// A routine is first warmed up so caches, branch predictors and CPU frequency
// settle, then timed over many independent iterations. Each iteration runs on
// a fresh copy of the input with a fresh operation counter and is validated
// for ascending output. The surviving iterations are reduced to a single
// Sample by taking the median of every metric, which keeps isolated
// scheduler or allocator hiccups from skewing the result.
//
// Timing and memory readings go through the `Clock` and `MemoryProbe` traits
// so platforms without an RSS source report memory as unavailable.

mod clock;
mod config;
mod memory;
mod protocol;

pub use clock::{Clock, MonotonicClock};
pub use config::MeasurementConfig;
pub use memory::{
    memory_delta, parse_statm_resident, platform_probe, MemoryProbe, NullProbe, ProcStatmProbe,
};
pub use protocol::{aggregate, MeasurementPhase, MeasurementProtocol, MeasurementRun};
