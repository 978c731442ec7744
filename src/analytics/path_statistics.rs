// src/analytics/path_statistics.rs
//! Sample Statistics of Simulated Paths
//!
//! # Correlation Recovery
//!
//! Per-step log-returns of a correlated GBM are
//! ```text
//! r_d = (μ_d - σ_d²/2) Δt + σ_d √Δt (L z)_d
//! ```
//! so their correlation across dimensions equals ρ for every step size.
//! Pooling all steps of all paths gives an estimator whose error shrinks
//! like `1/√(paths · steps)`.
//!
//! # Analytic Reference
//!
//! `E[S_t] = S_0 e^{μt}`, which is also the exact path when σ = 0.

use crate::error::{SdeError, SdeResult};
use crate::grid::TimeGrid;
use crate::models::gbm::Gbm;
use crate::path::MultiPath;
use nalgebra::DMatrix;
use ndarray::Array2;
use statrs::statistics::Statistics;

/// Pooled log-returns per dimension, `result[d]` spans every path
fn pooled_log_returns(paths: &[MultiPath]) -> SdeResult<Vec<Vec<f64>>> {
    let first = paths
        .first()
        .ok_or_else(|| SdeError::invalid_parameter("paths", "at least one path is required"))?;
    let dim = first.dimension();
    if paths.iter().any(|p| p.dimension() != dim) {
        return Err(SdeError::invalid_parameter(
            "paths",
            "all paths must have the same dimension",
        ));
    }

    Ok((0..dim)
        .map(|d| paths.iter().flat_map(|p| p.log_returns(d)).collect())
        .collect())
}

/// Empirical correlation matrix of per-step log-returns
///
/// A dimension with zero sample variance has no defined correlation; its
/// off-diagonal entries are NaN.
pub fn log_return_correlation(paths: &[MultiPath]) -> SdeResult<DMatrix<f64>> {
    let returns = pooled_log_returns(paths)?;
    let n = returns[0].len();
    if n < 2 {
        return Err(SdeError::invalid_parameter(
            "paths",
            "need at least two log-returns to estimate a correlation",
        ));
    }

    let dim = returns.len();
    let std_devs: Vec<f64> = returns.iter().map(|r| r.iter().std_dev()).collect();

    Ok(DMatrix::from_fn(dim, dim, |i, j| {
        if i == j {
            1.0
        } else {
            let cov = returns[i].iter().covariance(returns[j].iter());
            cov / (std_devs[i] * std_devs[j])
        }
    }))
}

/// Sample mean of the terminal value of each dimension
pub fn terminal_mean(paths: &[MultiPath]) -> SdeResult<Vec<f64>> {
    let first = paths
        .first()
        .ok_or_else(|| SdeError::invalid_parameter("paths", "at least one path is required"))?;
    Ok((0..first.dimension())
        .map(|d| paths.iter().map(|p| p.terminal()[d]).mean())
        .collect())
}

/// Sample standard deviation of each dimension's terminal value
pub fn terminal_std_dev(paths: &[MultiPath]) -> SdeResult<Vec<f64>> {
    let first = paths
        .first()
        .ok_or_else(|| SdeError::invalid_parameter("paths", "at least one path is required"))?;
    Ok((0..first.dimension())
        .map(|d| paths.iter().map(|p| p.terminal()[d]).std_dev())
        .collect())
}

/// Analytic zero-volatility solution `S_0 e^{μt}` on `grid`, one column per process
pub fn deterministic_path(processes: &[Gbm], grid: &TimeGrid) -> Array2<f64> {
    Array2::from_shape_fn((grid.len(), processes.len()), |(i, d)| {
        processes[d].expected_value(grid[i])
    })
}

/// Largest absolute deviation between two equally shaped matrices
pub fn max_abs_deviation(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
