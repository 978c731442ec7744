// src/linalg.rs
//! Correlation Matrices and Their Factorisation
//!
//! Independent normal draws `z` are correlated through a lower-triangular
//! factor `L` with `L Lᵀ = C`:
//! ```text
//! c = L z   ⇒   Cov(c) = L Cov(z) Lᵀ = C
//! ```
//!
//! [`CholeskyDecomposition`] tolerates positive-semi-definite input (zero
//! pivots within tolerance yield zero columns), so perfectly correlated
//! dimensions are accepted.

use crate::error::{validation::validate_range, SdeError, SdeResult};
use nalgebra::DMatrix;

const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Symmetric, unit-diagonal correlation matrix with entries in [-1, 1].
///
/// Construction checks shape and entries only. Positive semi-definiteness is
/// established when the matrix is factorised.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    matrix: DMatrix<f64>,
}

impl CorrelationMatrix {
    pub fn new(matrix: DMatrix<f64>) -> SdeResult<Self> {
        if !matrix.is_square() {
            return Err(SdeError::invalid_correlation(format!(
                "matrix must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        if matrix.nrows() == 0 {
            return Err(SdeError::invalid_correlation("matrix must not be empty"));
        }

        let n = matrix.nrows();
        for i in 0..n {
            for j in 0..n {
                let rho = matrix[(i, j)];
                if !rho.is_finite() {
                    return Err(SdeError::invalid_correlation(format!(
                        "entry ({}, {}) is not finite: {}",
                        i, j, rho
                    )));
                }
                if i == j {
                    if (rho - 1.0).abs() > SYMMETRY_TOLERANCE {
                        return Err(SdeError::invalid_correlation(format!(
                            "diagonal entry ({}, {}) must be 1, got {}",
                            i, i, rho
                        )));
                    }
                } else {
                    validate_range("correlation", rho, -1.0, 1.0).map_err(|_| {
                        SdeError::invalid_correlation(format!(
                            "entry ({}, {}) = {} is outside [-1, 1]",
                            i, j, rho
                        ))
                    })?;
                    if (rho - matrix[(j, i)]).abs() > SYMMETRY_TOLERANCE {
                        return Err(SdeError::invalid_correlation(format!(
                            "matrix is not symmetric at ({}, {}): {} vs {}",
                            i,
                            j,
                            rho,
                            matrix[(j, i)]
                        )));
                    }
                }
            }
        }

        Ok(Self { matrix })
    }

    pub fn identity(n: usize) -> Self {
        Self {
            matrix: DMatrix::identity(n, n),
        }
    }

    /// Every off-diagonal entry equal to `rho`
    pub fn constant(n: usize, rho: f64) -> SdeResult<Self> {
        let matrix = DMatrix::from_fn(n, n, |i, j| if i == j { 1.0 } else { rho });
        Self::new(matrix)
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> SdeResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(SdeError::invalid_correlation(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }
        Self::new(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
    }

    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == DMatrix::identity(self.dimension(), self.dimension())
    }
}

/// Factorisation `C = L Lᵀ` used to impart correlation on independent draws.
pub trait Decomposition {
    fn decompose(&self, matrix: &DMatrix<f64>) -> SdeResult<DMatrix<f64>>;
}

/// Cholesky–Banachiewicz factorisation accepting semi-definite input
#[derive(Debug, Clone, Copy)]
pub struct CholeskyDecomposition {
    pub tolerance: f64,
}

impl Default for CholeskyDecomposition {
    fn default() -> Self {
        CholeskyDecomposition { tolerance: 1e-12 }
    }
}

impl Decomposition for CholeskyDecomposition {
    fn decompose(&self, matrix: &DMatrix<f64>) -> SdeResult<DMatrix<f64>> {
        let n = matrix.nrows();
        if n == 0 || !matrix.is_square() {
            return Err(SdeError::invalid_correlation(
                "decomposition requires a non-empty square matrix",
            ));
        }

        let tol = self.tolerance;
        let mut l = DMatrix::<f64>::zeros(n, n);

        for i in 0..n {
            for j in 0..=i {
                let mut sum = matrix[(i, j)];
                for k in 0..j {
                    sum -= l[(i, k)] * l[(j, k)];
                }

                if i == j {
                    if sum < -tol {
                        return Err(SdeError::invalid_correlation(format!(
                            "matrix is not positive semi-definite (pivot {} = {:.6e})",
                            i, sum
                        )));
                    }
                    l[(i, i)] = if sum > tol { sum.sqrt() } else { 0.0 };
                } else if l[(j, j)] > 0.0 {
                    l[(i, j)] = sum / l[(j, j)];
                } else if sum.abs() > tol.sqrt() {
                    // zero pivot: row i must be fully explained by earlier columns
                    return Err(SdeError::invalid_correlation(format!(
                        "matrix is not positive semi-definite (residual {:.6e} at ({}, {}))",
                        sum, i, j
                    )));
                }
            }
        }

        Ok(l)
    }
}
