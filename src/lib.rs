//! Blue-noise dither pattern generation by simulated annealing.
//!
//! Two layers:
//!
//! - **Simulated Annealing (SA)**: a generic optimizer parameterized by a
//!   cost function and a neighbour function, with a cooling schedule
//!   derived from the iteration budget.
//! - **Patterns**: a square multi-channel grid, its pairwise blue-noise
//!   energy, a random-swap neighbourhood, and 8-bit export of the grid and
//!   its cosine spectrum.
//!
//! # Example
//!
//! ```
//! use u_bluenoise::pattern::{optimize, EnergyMode, EnergyParams, Pattern};
//! use u_bluenoise::sa::AnnealConfig;
//!
//! let pattern = Pattern::new(4, 1);
//! let config = AnnealConfig::default().with_max_iterations(200).with_seed(1);
//! let result = optimize(pattern, EnergyParams::default(), EnergyMode::Incremental, config);
//! assert!(result.best_cost <= result.initial_cost + 1e-9);
//! ```

pub mod error;
pub mod pattern;
pub mod sa;

pub use error::{BlueNoiseError, BlueNoiseResult};
