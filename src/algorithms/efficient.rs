//! Linearithmic reference routines

use std::cmp::Ordering;

use super::SortRoutine;
use crate::counters::OpCounter;
use crate::error::Result;

/// Quick sort with median-of-three pivot and Lomuto partitioning
///
/// Recurses into the smaller partition and loops on the larger one, so stack
/// depth stays logarithmic even on adversarial inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    fn sort_range(data: &mut [i32], mut lo: usize, mut hi: usize, counter: &mut OpCounter) {
        while hi - lo > 1 {
            let pivot = Self::partition(data, lo, hi, counter);
            if pivot - lo < hi - pivot - 1 {
                Self::sort_range(data, lo, pivot, counter);
                lo = pivot + 1;
            } else {
                Self::sort_range(data, pivot + 1, hi, counter);
                hi = pivot;
            }
        }
    }

    /// Partition `data[lo..hi]`, returning the pivot's final index
    fn partition(data: &mut [i32], lo: usize, hi: usize, counter: &mut OpCounter) -> usize {
        let last = hi - 1;
        let mid = lo + (last - lo) / 2;

        if counter.compare(&data[mid], &data[lo]) == Ordering::Less {
            counter.swap(data, mid, lo);
        }
        if counter.compare(&data[last], &data[lo]) == Ordering::Less {
            counter.swap(data, last, lo);
        }
        if counter.compare(&data[last], &data[mid]) == Ordering::Less {
            counter.swap(data, last, mid);
        }
        counter.swap(data, mid, last);

        let pivot = data[last];
        let mut store = lo;
        for j in lo..last {
            if counter.compare(&data[j], &pivot) != Ordering::Greater {
                counter.swap(data, store, j);
                store += 1;
            }
        }
        counter.swap(data, store, last);
        store
    }
}

impl SortRoutine for QuickSort {
    fn name(&self) -> &str {
        "Quick Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n log n)"
    }

    fn space_complexity(&self) -> &str {
        "O(log n)"
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn is_in_place(&self) -> bool {
        true
    }

    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()> {
        let len = data.len();
        Self::sort_range(data, 0, len, counter);
        Ok(())
    }
}

/// Top-down merge sort with a single scratch buffer
///
/// Merging moves elements instead of swapping them, so only comparisons are
/// counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    fn merge_sort(data: &mut [i32], scratch: &mut [i32], counter: &mut OpCounter) {
        let n = data.len();
        if n <= 1 {
            return;
        }
        let mid = n / 2;
        Self::merge_sort(&mut data[..mid], &mut scratch[..mid], counter);
        Self::merge_sort(&mut data[mid..], &mut scratch[mid..], counter);

        scratch.copy_from_slice(data);
        let (left, right) = scratch.split_at(mid);
        let (mut i, mut j) = (0, 0);
        for slot in data.iter_mut() {
            let take_left = j >= right.len()
                || (i < left.len() && counter.compare(&left[i], &right[j]) != Ordering::Greater);
            if take_left {
                *slot = left[i];
                i += 1;
            } else {
                *slot = right[j];
                j += 1;
            }
        }
    }
}

impl SortRoutine for MergeSort {
    fn name(&self) -> &str {
        "Merge Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n log n)"
    }

    fn space_complexity(&self) -> &str {
        "O(n)"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn is_in_place(&self) -> bool {
        false
    }

    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()> {
        let mut scratch = vec![0; data.len()];
        Self::merge_sort(data, &mut scratch, counter);
        Ok(())
    }
}

/// Heap sort over a max-heap
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl HeapSort {
    fn sift_down(data: &mut [i32], mut root: usize, len: usize, counter: &mut OpCounter) {
        loop {
            let left = 2 * root + 1;
            if left >= len {
                break;
            }
            let mut largest = root;
            if counter.compare(&data[left], &data[largest]) == Ordering::Greater {
                largest = left;
            }
            let right = left + 1;
            if right < len && counter.compare(&data[right], &data[largest]) == Ordering::Greater {
                largest = right;
            }
            if largest == root {
                break;
            }
            counter.swap(data, root, largest);
            root = largest;
        }
    }
}

impl SortRoutine for HeapSort {
    fn name(&self) -> &str {
        "Heap Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n log n)"
    }

    fn space_complexity(&self) -> &str {
        "O(1)"
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn is_in_place(&self) -> bool {
        true
    }

    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()> {
        let n = data.len();
        for start in (0..n / 2).rev() {
            Self::sift_down(data, start, n, counter);
        }
        for end in (1..n).rev() {
            counter.swap(data, 0, end);
            Self::sift_down(data, 0, end, counter);
        }
        Ok(())
    }
}
