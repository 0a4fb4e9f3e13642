// Sample file and summary written after a sweep

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::sample::Dataset;
use crate::storage;

/// Files produced by one sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepArtifacts {
    /// Seconds since the Unix epoch, shared by every file of the run
    pub timestamp: u64,
    pub csv_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Per-algorithm mean time and sample count, in first-appearance order
pub fn summary_text(dataset: &Dataset) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_summary(&mut out, dataset);
    out
}

fn write_summary(out: &mut String, dataset: &Dataset) -> fmt::Result {
    writeln!(out, "SORTING ALGORITHM PERFORMANCE ANALYSIS SUMMARY")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Total measurements: {}", dataset.len())?;
    writeln!(out)?;
    writeln!(out, "ALGORITHM PERFORMANCE OVERVIEW:")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for (algorithm, samples) in dataset.by_algorithm() {
        let mean_ms =
            samples.iter().map(|s| s.time_ms()).sum::<f64>() / samples.len() as f64;
        writeln!(
            out,
            "{:<15}: Avg Time = {:>8.2} ms ({} measurements)",
            algorithm,
            mean_ms,
            samples.len()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Detailed analysis available in CSV file.")
}

/// Write `sorting_results_<ts>.csv` and `summary_report_<ts>.txt` into `dir`
pub fn persist_results(dataset: &Dataset, dir: &Path) -> Result<SweepArtifacts> {
    fs::create_dir_all(dir)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let csv_path = dir.join(format!("sorting_results_{}.csv", timestamp));
    let summary_path = dir.join(format!("summary_report_{}.txt", timestamp));

    storage::save(dataset, &csv_path)?;
    fs::write(&summary_path, summary_text(dataset))?;
    tracing::info!("Summary report saved to: {}", summary_path.display());

    Ok(SweepArtifacts {
        timestamp,
        csv_path,
        summary_path,
    })
}
