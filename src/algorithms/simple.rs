//! Quadratic reference routines

use std::cmp::Ordering;

use super::SortRoutine;
use crate::counters::OpCounter;
use crate::error::Result;

/// Bubble sort with early exit when a pass makes no swaps
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl SortRoutine for BubbleSort {
    fn name(&self) -> &str {
        "Bubble Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n²)"
    }

    fn space_complexity(&self) -> &str {
        "O(1)"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn is_in_place(&self) -> bool {
        true
    }

    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()> {
        let n = data.len();
        for pass in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                if counter.compare(&data[j], &data[j + 1]) == Ordering::Greater {
                    counter.swap(data, j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        Ok(())
    }
}

/// Selection sort
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl SortRoutine for SelectionSort {
    fn name(&self) -> &str {
        "Selection Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n²)"
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
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                if counter.compare(&data[j], &data[min]) == Ordering::Less {
                    min = j;
                }
            }
            // self-swaps are not counted
            counter.swap(data, i, min);
        }
        Ok(())
    }
}

/// Insertion sort using adjacent swaps
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl SortRoutine for InsertionSort {
    fn name(&self) -> &str {
        "Insertion Sort"
    }

    fn time_complexity(&self) -> &str {
        "O(n²)"
    }

    fn space_complexity(&self) -> &str {
        "O(1)"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn is_in_place(&self) -> bool {
        true
    }

    fn sort(&self, data: &mut [i32], counter: &mut OpCounter) -> Result<()> {
        for i in 1..data.len() {
            let mut j = i;
            while j > 0 && counter.compare(&data[j - 1], &data[j]) == Ordering::Greater {
                counter.swap(data, j - 1, j);
                j -= 1;
            }
        }
        Ok(())
    }
}
