//! Aggregated performance samples and the dataset that holds them

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One aggregated measurement of an (algorithm, shape, size) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub algorithm: String,
    /// Data-shape label (e.g. "Random")
    pub shape: String,
    /// Number of elements sorted
    pub input_size: usize,
    /// Median execution time in nanoseconds
    pub time_ns: u64,
    /// Median resident-memory delta in bytes; `None` when no probe is available
    pub memory_bytes: Option<u64>,
    pub comparisons: u64,
    pub swaps: u64,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl Sample {
    /// Create a sample stamped with the current time
    pub fn new(
        algorithm: impl Into<String>,
        shape: impl Into<String>,
        input_size: usize,
        time_ns: u64,
        memory_bytes: Option<u64>,
        comparisons: u64,
        swaps: u64,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            shape: shape.into(),
            input_size,
            time_ns,
            memory_bytes,
            comparisons,
            swaps,
            timestamp_ms: now_millis(),
        }
    }

    /// All-zero sample returned when no measurement iteration survived
    ///
    /// Memory is left unavailable; see [`with_memory`](Self::with_memory).
    pub fn empty(algorithm: impl Into<String>, shape: impl Into<String>, input_size: usize) -> Self {
        Self::new(algorithm, shape, input_size, 0, None, 0, 0)
    }

    pub fn with_memory(mut self, memory_bytes: Option<u64>) -> Self {
        self.memory_bytes = memory_bytes;
        self
    }

    /// Override the creation timestamp (used when loading persisted samples)
    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// The (algorithm, shape, size) triple this sample measures
    pub fn cell(&self) -> Cell {
        Cell::new(&self.algorithm, &self.shape, self.input_size)
    }

    /// Comparison count is zero although the input needed sorting work
    pub fn has_operation_anomaly(&self) -> bool {
        self.input_size > 1 && self.comparisons == 0
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ns as f64 / 1_000_000.0
    }
}

/// Identity of one test-matrix cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub algorithm: String,
    pub shape: String,
    pub input_size: usize,
}

impl Cell {
    pub fn new(algorithm: &str, shape: &str, input_size: usize) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            shape: shape.to_string(),
            input_size,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} ({} elements)",
            self.algorithm, self.shape, self.input_size
        )
    }
}

/// Ordered collection of samples in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Group samples by algorithm, groups in first-appearance order
    pub fn by_algorithm(&self) -> Vec<(&str, Vec<&Sample>)> {
        group_in_order(self.samples.iter(), |s| s.algorithm.as_str())
    }

    /// Group samples by shape label, groups in first-appearance order
    pub fn by_shape(&self) -> Vec<(&str, Vec<&Sample>)> {
        group_in_order(self.samples.iter(), |s| s.shape.as_str())
    }

    /// Group samples by input size, groups ordered by ascending size
    pub fn by_size(&self) -> Vec<(usize, Vec<&Sample>)> {
        let mut groups = group_in_order(self.samples.iter(), |s| s.input_size);
        groups.sort_by_key(|(size, _)| *size);
        groups
    }

    /// Samples restricted to one shape label
    pub fn with_shape<'a>(&'a self, shape: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.shape == shape)
    }
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Group items by key, keeping groups in first-appearance order
pub(crate) fn group_in_order<'a, K, I, F>(items: I, key: F) -> Vec<(K, Vec<&'a Sample>)>
where
    K: PartialEq,
    I: Iterator<Item = &'a Sample>,
    F: Fn(&'a Sample) -> K,
{
    let mut groups: Vec<(K, Vec<&'a Sample>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(algorithm: &str, shape: &str, size: usize, time_ns: u64) -> Sample {
        Sample::new(algorithm, shape, size, time_ns, Some(0), 10, 5)
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let dataset = Dataset::from(vec![
            sample("B", "Random", 10, 1),
            sample("A", "Sorted", 10, 2),
            sample("B", "Sorted", 20, 3),
        ]);
        let groups = dataset.by_algorithm();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "A");

        let shapes: Vec<&str> = dataset.by_shape().iter().map(|(k, _)| *k).collect();
        assert_eq!(shapes, vec!["Random", "Sorted"]);
    }

    #[test]
    fn test_by_size_sorted_ascending() {
        let dataset = Dataset::from(vec![
            sample("A", "Random", 400, 1),
            sample("A", "Random", 100, 1),
            sample("A", "Random", 200, 1),
        ]);
        let sizes: Vec<usize> = dataset.by_size().iter().map(|(k, _)| *k).collect();
        assert_eq!(sizes, vec![100, 200, 400]);
    }

    #[test]
    fn test_operation_anomaly() {
        let mut s = Sample::empty("A", "Random", 100);
        assert!(s.has_operation_anomaly());
        s.input_size = 1;
        assert!(!s.has_operation_anomaly());
    }

    #[test]
    fn test_cell_display() {
        let cell = Cell::new("Heap Sort", "Sorted", 400);
        assert_eq!(cell.to_string(), "Heap Sort on Sorted (400 elements)");
    }

    #[test]
    fn test_with_timestamp_overrides() {
        let s = sample("A", "Random", 10, 1).with_timestamp(1234);
        assert_eq!(s.timestamp_ms, 1234);
    }
}
