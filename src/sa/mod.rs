//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases as the temperature cools over the iteration budget, allowing
//! the search to escape local optima.
//!
//! The engine is generic: any state type works once it is paired with a
//! cost function and a neighbour function, either through the
//! [`AnnealProblem`] trait or as closures via [`Annealer::from_fns`].
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, CoolingSchedule};
pub use runner::{acceptance_probability, AnnealResult, Annealer};
pub use types::{AnnealProblem, FnProblem};
