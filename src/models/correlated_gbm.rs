// src/models/correlated_gbm.rs
//! Correlated Multi-Dimensional Geometric Brownian Motion
//!
//! # Mathematical Framework
//!
//! D scalar GBMs driven by correlated Brownian motions:
//! ```text
//! dS_t^(d) = μ_d S_t^(d) dt + σ_d S_t^(d) dW_t^(d),    d⟨W^(i), W^(j)⟩_t = ρ_ij dt
//! ```
//!
//! With `L Lᵀ = ρ`, the correlated increments are built from independent
//! standard normals `z`:
//! ```text
//! ΔW = √Δt · L z
//! ```

use super::gbm::Gbm;
use crate::error::{validation::validate_dimension, SdeError, SdeResult};
use crate::linalg::{CholeskyDecomposition, CorrelationMatrix, Decomposition};
use nalgebra::DMatrix;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CorrelatedGbm {
    processes: Vec<Gbm>,
    correlation: CorrelationMatrix,
    factor: DMatrix<f64>,
}

impl CorrelatedGbm {
    pub fn new(processes: Vec<Gbm>, correlation: CorrelationMatrix) -> SdeResult<Self> {
        Self::with_decomposition(processes, correlation, &CholeskyDecomposition::default())
    }

    pub fn with_decomposition<D: Decomposition + ?Sized>(
        processes: Vec<Gbm>,
        correlation: CorrelationMatrix,
        decomposition: &D,
    ) -> SdeResult<Self> {
        if processes.is_empty() {
            return Err(SdeError::invalid_parameter(
                "params",
                "at least one process is required",
            ));
        }
        validate_dimension("params", correlation.dimension(), processes.len())?;

        for (d, process) in processes.iter().enumerate() {
            process.validate().map_err(|e| match e {
                SdeError::InvalidParameter { parameter, reason } => SdeError::InvalidParameter {
                    parameter: format!("params[{}].{}", d, parameter),
                    reason,
                },
                other => other,
            })?;
            if process.is_deterministic() {
                warn!(dimension = d, "zero volatility, dimension follows its drift deterministically");
            }
        }

        let factor = decomposition.decompose(correlation.as_matrix())?;
        if let Some(d) = (0..factor.nrows()).find(|&d| factor[(d, d)] == 0.0) {
            warn!(dimension = d, "correlation matrix is singular, dimension is fully determined by earlier ones");
        }
        debug!(dimension = processes.len(), "correlation factorised");

        Ok(CorrelatedGbm {
            processes,
            correlation,
            factor,
        })
    }

    /// Independent dimensions
    pub fn uncorrelated(processes: Vec<Gbm>) -> SdeResult<Self> {
        let n = processes.len();
        Self::new(processes, CorrelationMatrix::identity(n.max(1)))
    }

    pub fn dimension(&self) -> usize {
        self.processes.len()
    }

    pub fn processes(&self) -> &[Gbm] {
        &self.processes
    }

    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Lower-triangular factor `L` with `L Lᵀ = ρ`
    pub fn factor(&self) -> &DMatrix<f64> {
        &self.factor
    }

    pub fn initial_values(&self) -> Vec<f64> {
        self.processes.iter().map(|p| p.s0).collect()
    }

    /// `out = L · independent`, exploiting the triangular shape
    pub fn correlate(&self, independent: &[f64], out: &mut [f64]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = (0..=i).map(|k| self.factor[(i, k)] * independent[k]).sum();
        }
    }
}
