// Test matrix: which routines, shapes and sizes a sweep covers

use serde::{Deserialize, Serialize};

use crate::algorithms::{self, SortRoutine};
use crate::error::{BenchError, Result};
use crate::generator::DataShape;
use crate::sample::Cell;

/// Input sizes of the default study
pub const DEFAULT_SIZES: [usize; 6] = [100, 200, 400, 600, 800, 1_000];

/// Combinatorial {algorithm x shape x size} grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMatrix {
    /// Routine names, resolved through the routine registry
    pub algorithms: Vec<String>,
    /// Data-shape labels
    pub shapes: Vec<String>,
    pub sizes: Vec<usize>,
}

impl Default for TestMatrix {
    fn default() -> Self {
        Self {
            algorithms: algorithms::registry()
                .iter()
                .map(|r| r.name().to_string())
                .collect(),
            shapes: DataShape::ALL.iter().map(|s| s.label().to_string()).collect(),
            sizes: DEFAULT_SIZES.to_vec(),
        }
    }
}

impl TestMatrix {
    /// Number of cells in the cross product
    pub fn total_cells(&self) -> usize {
        self.algorithms.len() * self.shapes.len() * self.sizes.len()
    }

    /// Every cell, in sweep nesting order (algorithm, then shape, then size)
    ///
    /// Known routines are listed under their registry name ("quick" becomes
    /// "Quick Sort") so cells match the samples a sweep records.
    pub fn expected_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.total_cells());
        for name in &self.algorithms {
            let algorithm = algorithms::find_routine(name)
                .map(|routine| routine.name().to_string())
                .unwrap_or_else(|| name.clone());
            for shape in &self.shapes {
                for &size in &self.sizes {
                    cells.push(Cell::new(&algorithm, shape, size));
                }
            }
        }
        cells
    }

    /// Look up every configured routine by name
    pub fn resolve_routines(&self) -> Result<Vec<Box<dyn SortRoutine>>> {
        self.algorithms
            .iter()
            .map(|name| {
                algorithms::find_routine(name)
                    .ok_or_else(|| BenchError::Config(format!("unknown algorithm '{}'", name)))
            })
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.algorithms.is_empty() {
            return Err("at least one algorithm is required".to_string());
        }
        if self.shapes.is_empty() {
            return Err("at least one data shape is required".to_string());
        }
        if self.sizes.is_empty() {
            return Err("at least one input size is required".to_string());
        }
        Ok(())
    }
}
