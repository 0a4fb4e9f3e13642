//! Operation counters for instrumented sort routines
//!
//! A fresh `OpCounter` is handed to the routine for every measured call, so
//! counts can never leak between calls or threads.

use std::cmp::Ordering;

/// Comparison and swap totals captured after one sort call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub comparisons: u64,
    pub swaps: u64,
}

/// Per-measurement comparison/swap counter
#[derive(Debug, Default)]
pub struct OpCounter {
    comparisons: u64,
    swaps: u64,
}

impl OpCounter {
    /// Create a zeroed counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare two values, counting exactly one comparison
    pub fn compare<T: Ord + ?Sized>(&mut self, a: &T, b: &T) -> Ordering {
        self.comparisons += 1;
        a.cmp(b)
    }

    /// Swap two positions, counting the swap only when `i != j`
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds, like `slice::swap`.
    pub fn swap<T>(&mut self, data: &mut [T], i: usize, j: usize) {
        if i != j {
            self.swaps += 1;
            data.swap(i, j);
        }
    }

    /// Zero both counters
    pub fn reset(&mut self) {
        self.comparisons = 0;
        self.swaps = 0;
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Read both counters at once
    pub fn snapshot(&self) -> OpCounts {
        OpCounts {
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }
}
