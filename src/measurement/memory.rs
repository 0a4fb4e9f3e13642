// Best-effort resident-memory probes
//
// Rust has no collector to force before sampling, so `reclaim` is only a hook
// and the reported delta is a coarse, page-granular RSS difference. Platforms
// without a probe report memory as unavailable instead of zero.

use std::fs;

const STATM_PATH: &str = "/proc/self/statm";

/// Source of process memory readings
pub trait MemoryProbe: Send + Sync {
    /// Release reclaimable memory before a reading
    fn reclaim(&self) {}

    /// Current resident memory in bytes, or `None` when unavailable
    fn resident_bytes(&self) -> Option<u64>;

    /// Whether readings can be taken at all
    fn is_available(&self) -> bool {
        self.resident_bytes().is_some()
    }
}

/// Probe for platforms without a memory source
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl MemoryProbe for NullProbe {
    fn resident_bytes(&self) -> Option<u64> {
        None
    }
}

/// Resident set size from `/proc/self/statm` (Linux)
#[derive(Debug, Clone, Copy)]
pub struct ProcStatmProbe {
    page_size: u64,
}

impl ProcStatmProbe {
    /// Returns `None` if `/proc/self/statm` cannot be read
    pub fn new() -> Option<Self> {
        let probe = Self {
            page_size: page_size(),
        };
        probe.resident_bytes().map(|_| probe)
    }
}

impl MemoryProbe for ProcStatmProbe {
    fn resident_bytes(&self) -> Option<u64> {
        let text = fs::read_to_string(STATM_PATH).ok()?;
        parse_statm_resident(&text).map(|pages| pages * self.page_size)
    }
}

/// Resident page count: the second whitespace-separated field of statm
pub fn parse_statm_resident(text: &str) -> Option<u64> {
    text.split_whitespace().nth(1)?.parse().ok()
}

fn page_size() -> u64 {
    // SAFETY: sysconf has no preconditions and only reads a system constant.
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw > 0 {
        raw as u64
    } else {
        4096
    }
}

/// Best probe available on this platform
pub fn platform_probe() -> Box<dyn MemoryProbe> {
    match ProcStatmProbe::new() {
        Some(probe) => Box::new(probe),
        None => {
            tracing::debug!("No memory probe available; memory deltas will be reported as unavailable");
            Box::new(NullProbe)
        }
    }
}

/// Clamped difference of two readings; `None` if either reading is missing
pub fn memory_delta(before: Option<u64>, after: Option<u64>) -> Option<u64> {
    Some(after?.saturating_sub(before?))
}
