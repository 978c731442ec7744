// src/mc/path_simulator.rs
use crate::error::{validation::validate_dimension, SdeResult};
use crate::grid::TimeGrid;
use crate::linalg::CorrelationMatrix;
use crate::mc::path_generator::PathGenerator;
use crate::models::correlated_gbm::CorrelatedGbm;
use crate::models::gbm::Gbm;
use crate::path::MultiPath;
use crate::rng::NormalSource;
use std::sync::atomic::AtomicBool;

/// One-shot simulation of a correlated GBM path on a uniform grid
pub struct PathSimulator;

impl PathSimulator {
    /// Simulate one joint path of `params.len()` correlated GBMs
    ///
    /// # Algorithm
    ///
    /// 1. Uniform grid with `steps + 1` points, Δt = maturity / steps
    /// 2. Cholesky factor `L` of `correlation`
    /// 3. Per step: z ~ N(0, I), c = L z, log-space Euler-Maruyama update
    ///
    /// # Errors
    ///
    /// - `InvalidParameter`: maturity ≤ 0, steps = 0, `params.len()` differs
    ///   from the correlation dimension, invalid process parameters
    /// - `InvalidCorrelation`: matrix is not positive semi-definite
    /// - `NumericOverflow`: a value left the representable range
    pub fn simulate<N: NormalSource + ?Sized>(
        params: &[Gbm],
        correlation: &CorrelationMatrix,
        maturity: f64,
        steps: usize,
        rng: &mut N,
    ) -> SdeResult<MultiPath> {
        Self::generator(params, correlation, maturity, steps)?.next(rng)
    }

    /// [`PathSimulator::simulate`] with a cancellation flag checked between steps
    pub fn simulate_cancellable<N: NormalSource + ?Sized>(
        params: &[Gbm],
        correlation: &CorrelationMatrix,
        maturity: f64,
        steps: usize,
        rng: &mut N,
        cancel: &AtomicBool,
    ) -> SdeResult<MultiPath> {
        Self::generator(params, correlation, maturity, steps)?.next_cancellable(rng, cancel)
    }

    fn generator(
        params: &[Gbm],
        correlation: &CorrelationMatrix,
        maturity: f64,
        steps: usize,
    ) -> SdeResult<PathGenerator> {
        let grid = TimeGrid::uniform(maturity, steps)?;
        validate_dimension("params", correlation.dimension(), params.len())?;
        let process = CorrelatedGbm::new(params.to_vec(), correlation.clone())?;
        Ok(PathGenerator::new(process, grid))
    }
}
