//! sortbench - statistically rigorous benchmarking of sorting routines
//!
//! This library provides the measurement-and-analysis pipeline: a warm-up and
//! median-of-many measurement protocol for one (routine, dataset) pair, a
//! sequential sweep over an {algorithm x data shape x size} test matrix, CSV
//! persistence of the resulting samples, and a statistical engine that checks,
//! models and ranks them.

pub mod algorithms;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod counters;
pub mod error;
pub mod generator;
pub mod measurement;
pub mod pipeline;
pub mod sample;
pub mod stats;
pub mod storage;
pub mod sweep;

pub use error::{BenchError, Result};
