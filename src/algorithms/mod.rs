//! Instrumented reference sort routines
//!
//! Every routine sorts `i32` slices in ascending order and reports its work
//! through the `OpCounter` it is handed. The measurement code only depends on
//! the `SortRoutine` trait, so any implementation can be plugged in.

mod efficient;
mod simple;

pub use efficient::{HeapSort, MergeSort, QuickSort};
pub use simple::{BubbleSort, InsertionSort, SelectionSort};

use crate::counters::OpCounter;
use crate::error::Result;

/// Contract every measurable sort routine satisfies
pub trait SortRoutine: Send + Sync {
    /// Display name, persisted verbatim in sample files
    fn name(&self) -> &str;

    /// Theoretical average time complexity (e.g. "O(n log n)")
    fn time_complexity(&self) -> &str;

    /// Theoretical auxiliary space complexity (e.g. "O(1)")
    fn space_complexity(&self) -> &str;

    fn is_stable(&self) -> bool;

    fn is_in_place(&self) -> bool;

    /// Sort `data` ascending, counting comparisons and swaps in `counter`
    ///
    /// Returns `BenchError::InvalidInput` if the routine cannot accept `data`.
    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()>;
}

/// All reference routines, in the order the default sweep visits them
pub fn registry() -> Vec<Box<dyn SortRoutine>> {
    vec![
        Box::new(BubbleSort),
        Box::new(SelectionSort),
        Box::new(InsertionSort),
        Box::new(QuickSort),
        Box::new(MergeSort),
        Box::new(HeapSort),
    ]
}

/// Look up a reference routine by name
///
/// Matching ignores case, whitespace and punctuation, and the trailing
/// "sort" may be omitted: "quick", "Quick Sort" and "quicksort" all match.
pub fn find_routine(name: &str) -> Option<Box<dyn SortRoutine>> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    registry().into_iter().find(|routine| {
        let candidate = normalize(routine.name());
        candidate == wanted || candidate == format!("{}sort", wanted)
    })
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check that `data` is in ascending order
pub fn is_sorted(data: &[i32]) -> bool {
    data.windows(2).all(|pair| pair[0] <= pair[1])
}
