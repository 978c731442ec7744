// src/mc/mc_engine.rs
use crate::error::{validation::*, SdeError, SdeResult};
use crate::grid::TimeGrid;
use crate::linalg::{CholeskyDecomposition, CorrelationMatrix, Decomposition};
use crate::mc::path_generator::PathGenerator;
use crate::models::correlated_gbm::CorrelatedGbm;
use crate::models::gbm::Gbm;
use crate::path::MultiPath;
use crate::rng::RngFactory;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub paths: usize,
    pub steps: usize,
    pub maturity: f64,
    pub seed: u64,
    /// One label per dimension, used by the writers in `output`
    pub labels: Vec<String>,
    pub processes: Vec<Gbm>,
    /// Row-major D×D correlation matrix
    pub correlation: Vec<Vec<f64>>,
}

impl SimulationConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> SdeResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_finite("maturity", self.maturity)?;
        validate_positive("maturity", self.maturity)?;

        if self.processes.is_empty() {
            return Err(SdeError::invalid_parameter(
                "processes",
                "at least one process is required",
            ));
        }
        validate_dimension("labels", self.processes.len(), self.labels.len())?;
        validate_dimension("processes", self.correlation.len(), self.processes.len())?;

        for (d, process) in self.processes.iter().enumerate() {
            process.validate().map_err(|e| match e {
                SdeError::InvalidParameter { parameter, reason } => SdeError::InvalidParameter {
                    parameter: format!("{}.{}", self.labels[d], parameter),
                    reason,
                },
                other => other,
            })?;
        }

        let correlation = CorrelationMatrix::from_rows(&self.correlation)?;
        CholeskyDecomposition::default().decompose(correlation.as_matrix())?;
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.processes.len()
    }

    pub fn correlation_matrix(&self) -> SdeResult<CorrelationMatrix> {
        CorrelationMatrix::from_rows(&self.correlation)
    }

    /// Validate, factorise the correlation and bind the process to its grid
    pub fn generator(&self) -> SdeResult<PathGenerator> {
        self.validate()?;
        let grid = TimeGrid::uniform(self.maturity, self.steps)?;
        let process = CorrelatedGbm::new(self.processes.clone(), self.correlation_matrix()?)?;
        Ok(PathGenerator::new(process, grid))
    }

    pub fn from_json_str(json: &str) -> SdeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SdeError::invalid_parameter("config", format!("malformed JSON: {}", e)))
    }

    pub fn from_json_file(path: &Path) -> SdeResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SdeError::invalid_parameter("config", format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            paths: 1,
            steps: 100,
            maturity: 1.0,
            seed: 12345,
            labels: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            processes: vec![
                Gbm::new(1.0, 0.05, 0.2),
                Gbm::new(2.0, 0.03, 0.15),
                Gbm::new(3.0, 0.02, 0.1),
            ],
            correlation: CorrelationMatrix::identity(3).to_rows(),
        }
    }
}

/// Simulate `cfg.paths` independent paths in parallel
///
/// # Reproducibility
///
/// Path `i` draws from its own `StdRng` seeded with `cfg.seed + i`, so the
/// batch is identical for any number of rayon threads and path `0` equals
/// [`simulate_single`].
///
/// # Errors
///
/// Configuration errors are reported before any path is generated; the
/// first numeric failure aborts the whole batch.
pub fn simulate_paths(cfg: &SimulationConfig) -> SdeResult<Vec<MultiPath>> {
    let generator = cfg.generator()?;
    let factory = RngFactory::new(cfg.seed);
    info!(
        paths = cfg.paths,
        steps = cfg.steps,
        dimension = cfg.dimension(),
        threads = rayon::current_num_threads(),
        "simulating paths"
    );

    let paths = (0..cfg.paths)
        .into_par_iter()
        .map(|i| {
            let mut rng = factory.create_std_rng(i as u64);
            generator.next(&mut rng)
        })
        .collect::<SdeResult<Vec<_>>>()?;

    debug!(paths = paths.len(), "batch complete");
    Ok(paths)
}

/// The first path of [`simulate_paths`] without simulating the rest
pub fn simulate_single(cfg: &SimulationConfig) -> SdeResult<MultiPath> {
    let generator = cfg.generator()?;
    let mut rng = RngFactory::new(cfg.seed).create_std_rng(0);
    generator.next(&mut rng)
}
