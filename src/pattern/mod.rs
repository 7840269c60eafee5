//! Blue-noise patterns.
//!
//! A [`Pattern`] is a square grid of cells, each holding `dims` channels in
//! `[0, 1)`. Its [energy](Pattern::energy) is low when nearby cells carry
//! dissimilar values, which is what makes a pattern "blue". Annealing a
//! random pattern under single-swap moves ([`BlueNoiseProblem`]) lowers the
//! energy while keeping the multiset of cell values fixed.
//!
//! # References
//!
//! - Georgiev & Fajardo (2016), "Blue-noise Dithered Sampling"

mod energy;
mod export;
mod grid;
mod neighbour;

pub use energy::EnergyParams;
pub use export::{
    channel_values, cosine_spectrum, spectrum_luma8, to_luma8, ChannelSelect, LumaImage,
};
pub use grid::Pattern;
pub use neighbour::{
    optimize, random_swap, swap_neighbour, BlueNoiseProblem, EnergyMode, ScoredPattern,
};
