//! Swap neighbourhood and the blue-noise annealing problem.

use super::energy::EnergyParams;
use super::grid::Pattern;
use crate::sa::{AnnealConfig, AnnealProblem, AnnealResult, Annealer};
use rand::Rng;

/// Draws two cell coordinates independently and uniformly.
///
/// The two draws may coincide.
pub fn random_swap<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> ((usize, usize), (usize, usize)) {
    let xi = rng.random_range(0..size);
    let yi = rng.random_range(0..size);
    let xj = rng.random_range(0..size);
    let yj = rng.random_range(0..size);
    ((xi, yi), (xj, yj))
}

/// Returns a copy of `pattern` with two random cells exchanged.
///
/// The input is left untouched. When both draws land on the same cell the
/// copy equals the input.
pub fn swap_neighbour<R: Rng + ?Sized>(pattern: &Pattern, rng: &mut R) -> Pattern {
    let (a, b) = random_swap(pattern.size(), rng);
    let mut next = pattern.clone();
    next.swap_cells(a, b);
    next
}

/// How the blue-noise problem evaluates a candidate's energy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyMode {
    /// Recompute the full O(n²) sum for every candidate.
    Full,
    /// Add the O(n) swap delta to the parent's energy.
    #[default]
    Incremental,
}

/// A pattern together with its energy under some [`EnergyParams`].
///
/// Incremental updates accumulate rounding error; call
/// [`ScoredPattern::rescore`] to resynchronize.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPattern {
    pub pattern: Pattern,
    pub energy: f64,
}

impl ScoredPattern {
    pub fn new(pattern: Pattern, params: &EnergyParams) -> Self {
        let energy = pattern.energy(params);
        Self { pattern, energy }
    }

    /// Recomputes the cached energy from scratch.
    pub fn rescore(&mut self, params: &EnergyParams) {
        self.energy = self.pattern.energy(params);
    }
}

/// Blue-noise pattern optimization as an [`AnnealProblem`].
///
/// Cost is the pattern energy; the neighbourhood is a single random swap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlueNoiseProblem {
    pub params: EnergyParams,
    pub mode: EnergyMode,
}

impl BlueNoiseProblem {
    pub fn new(params: EnergyParams, mode: EnergyMode) -> Self {
        Self { params, mode }
    }

    /// Wraps `pattern` with its energy under this problem's parameters.
    pub fn score(&self, pattern: Pattern) -> ScoredPattern {
        ScoredPattern::new(pattern, &self.params)
    }
}

impl AnnealProblem for BlueNoiseProblem {
    type Solution = ScoredPattern;

    fn cost(&self, solution: &ScoredPattern) -> f64 {
        solution.energy
    }

    fn neighbor<R: Rng>(&self, solution: &ScoredPattern, rng: &mut R) -> ScoredPattern {
        let (a, b) = random_swap(solution.pattern.size(), rng);
        let mut pattern = solution.pattern.clone();

        let energy = match self.mode {
            EnergyMode::Full => {
                pattern.swap_cells(a, b);
                pattern.energy(&self.params)
            }
            EnergyMode::Incremental => {
                let delta = pattern.swap_delta(a, b, &self.params);
                pattern.swap_cells(a, b);
                solution.energy + delta
            }
        };
        ScoredPattern { pattern, energy }
    }
}

/// Anneals `pattern` towards blue noise.
///
/// The returned best state's energy is rescored from scratch.
///
/// # Panics
/// Panics if `config` or `params` is invalid.
pub fn optimize(
    pattern: Pattern,
    params: EnergyParams,
    mode: EnergyMode,
    config: AnnealConfig,
) -> AnnealResult<ScoredPattern> {
    params.validate().expect("invalid EnergyParams");

    let problem = BlueNoiseProblem::new(params, mode);
    let initial = problem.score(pattern);
    let annealer = Annealer::new(problem, config);

    let mut result = annealer.run(initial);
    result.best.rescore(&params);
    result.best_cost = result.best.energy;
    result
}
