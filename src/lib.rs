//! # gbm-paths: Correlated Geometric Brownian Motion Paths
//!
//! Simulates joint sample paths of D correlated geometric Brownian motions
//! on a discrete time grid.
//!
//! ## Key Features
//!
//! - **Log-space Euler-Maruyama**: strictly positive paths, no drift bias for GBM
//! - **Correlation**: semi-definite tolerant Cholesky factorisation
//! - **Reproducible**: seeded generators, identical batches for any thread count
//! - **Parallel batches**: independent paths with Rayon, one generator per path
//! - **Checked numerics**: overflow/underflow detection and cooperative cancellation
//!
//! ## Quick Start
//!
//! ```rust
//! use gbm_paths::linalg::CorrelationMatrix;
//! use gbm_paths::mc::path_simulator::PathSimulator;
//! use gbm_paths::models::gbm::Gbm;
//! use gbm_paths::rng;
//!
//! let params = [
//!     Gbm::new(1.0, 0.05, 0.2),
//!     Gbm::new(2.0, 0.03, 0.15),
//!     Gbm::new(3.0, 0.02, 0.1),
//! ];
//! let correlation = CorrelationMatrix::identity(3);
//! let mut rng = rng::seed_rng_from_u64(42);
//!
//! let path = PathSimulator::simulate(&params, &correlation, 1.0, 100, &mut rng)
//!     .expect("Valid configuration");
//! assert_eq!(path.len(), 101);
//! assert_eq!(path.initial().to_vec(), vec![1.0, 2.0, 3.0]);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Each dimension follows `dS = μ S dt + σ S dW` with `d⟨W_i, W_j⟩ = ρ_ij dt`.
//! The scheme advances `ln S` by `(μ - σ²/2) Δt + σ √Δt (L z)_d` where
//! `L Lᵀ = ρ` and `z ~ N(0, I)`.

// Module declarations
pub mod analytics;
pub mod error;
pub mod grid;
pub mod linalg;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod path;
pub mod rng;
pub mod solvers;

// Re-export commonly used types for convenience
pub use error::{SdeError, SdeResult};
pub use grid::TimeGrid;
pub use linalg::CorrelationMatrix;
pub use mc::path_simulator::PathSimulator;
pub use models::gbm::Gbm;
pub use path::MultiPath;
