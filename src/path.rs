// src/path.rs
//! Simulated multi-dimensional paths
//!
//! A [`MultiPath`] stores one row per grid point and one column per
//! dimension. Row 0 holds the initial values. Paths are never mutated after
//! the generator hands them out, and paths from one generator share its grid.

use crate::grid::TimeGrid;
use ndarray::{Array2, ArrayView1};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPath {
    grid: Arc<TimeGrid>,
    values: Array2<f64>,
}

impl MultiPath {
    /// `values` must have `grid.len()` rows
    pub(crate) fn new(grid: Arc<TimeGrid>, values: Array2<f64>) -> Self {
        debug_assert_eq!(values.nrows(), grid.len());
        MultiPath { grid, values }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn times(&self) -> &[f64] {
        self.grid.times()
    }

    /// Number of grid points (`steps + 1`)
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn dimension(&self) -> usize {
        self.values.ncols()
    }

    pub fn value(&self, point: usize, dimension: usize) -> f64 {
        self.values[[point, dimension]]
    }

    /// All dimensions at grid point `i`
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// One dimension across the whole grid
    pub fn dimension_path(&self, d: usize) -> ArrayView1<'_, f64> {
        self.values.column(d)
    }

    pub fn initial(&self) -> ArrayView1<'_, f64> {
        self.values.row(0)
    }

    pub fn terminal(&self) -> ArrayView1<'_, f64> {
        self.values.row(self.values.nrows() - 1)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Per-step log-returns `ln(S_i / S_{i-1})` of dimension `d`
    pub fn log_returns(&self, d: usize) -> Vec<f64> {
        let column = self.values.column(d);
        (1..column.len())
            .map(|i| (column[i] / column[i - 1]).ln())
            .collect()
    }
}
