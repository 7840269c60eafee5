//! Annealing loop execution.
//!
//! # Algorithm
//!
//! 1. Evaluate the initial state; it is both current and best.
//! 2. For `k` in `0..k_max`, while the current cost exceeds `stop_error`:
//!    a. Draw a neighbour of the current state and evaluate it
//!    b. Accept it if it improves, or with probability
//!       `exp((current - candidate) / T(k))`
//!    c. Record a new best if the accepted state beats it
//! 3. Return the best state.

use super::config::AnnealConfig;
use super::types::{AnnealProblem, FnProblem};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S: Clone> {
    /// The best state found.
    pub best: S,

    /// Cost of the best state.
    pub best_cost: f64,

    /// Cost of the initial state.
    pub initial_cost: f64,

    /// Number of iterations executed (neighbour evaluations).
    pub iterations: usize,

    /// Temperature of the last executed iteration; `None` when no iteration
    /// ran (zero budget, already converged, or cancelled up front).
    pub final_temperature: Option<f64>,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether the run stopped because the current cost reached `stop_error`.
    pub converged: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost sampled at regular intervals. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Probability of moving from a state of cost `current` to one of cost
/// `candidate` at temperature `temperature`.
///
/// Moves that do not worsen the cost are always taken (`exp(0) = 1`).
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate <= current {
        1.0
    } else if temperature > 0.0 {
        ((current - candidate) / temperature).exp()
    } else {
        0.0
    }
}

fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Simulated annealing engine, generic over the problem it optimizes.
///
/// # Usage
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_bluenoise::sa::{AnnealConfig, Annealer};
///
/// let config = AnnealConfig::default().with_max_iterations(2000).with_seed(1);
/// let annealer = Annealer::from_fns(
///     config,
///     |x: &f64| x * x,
///     |x: &f64, rng: &mut dyn RngCore| x + rng.random_range(-0.5..0.5),
/// );
/// let best = annealer.cook(8.0);
/// assert!(best.abs() < 8.0);
/// ```
pub struct Annealer<P: AnnealProblem> {
    problem: P,
    config: AnnealConfig,
}

impl<S, C, N> Annealer<FnProblem<S, C, N>>
where
    S: Clone,
    C: Fn(&S) -> f64,
    N: Fn(&S, &mut dyn RngCore) -> S,
{
    /// Builds an annealer from a cost closure and a neighbour closure.
    pub fn from_fns(config: AnnealConfig, cost: C, neighbour: N) -> Self {
        Self::new(FnProblem::new(cost, neighbour), config)
    }
}

impl<P: AnnealProblem> Annealer<P> {
    pub fn new(problem: P, config: AnnealConfig) -> Self {
        Self { problem, config }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Anneals from `initial` and returns the best state found.
    pub fn cook(&self, initial: P::Solution) -> P::Solution {
        self.run(initial).best
    }

    /// Anneals from `initial` and returns the full run report.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AnnealConfig::validate`]
    /// first to get a descriptive error).
    pub fn run(&self, initial: P::Solution) -> AnnealResult<P::Solution> {
        self.run_with_cancel(initial, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; a set flag ends the run
    /// with the best state found so far.
    pub fn run_with_cancel(
        &self,
        initial: P::Solution,
        cancel: Option<Arc<AtomicBool>>,
    ) -> AnnealResult<P::Solution> {
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        self.run_with_rng(initial, &mut rng, cancel)
    }

    /// Runs with a caller-supplied random generator.
    ///
    /// `config.seed` is ignored; every draw comes from `rng`.
    pub fn run_with_rng<R: Rng>(
        &self,
        initial: P::Solution,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> AnnealResult<P::Solution> {
        let config = &self.config;
        config.validate().expect("invalid AnnealConfig");

        let k_max = config.max_iterations;
        let initial_cost = self.problem.cost(&initial);

        let mut current = initial;
        let mut current_cost = initial_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut final_temperature = None;
        let mut cancelled = false;

        let mut cost_history = vec![best_cost];

        debug!(k_max, initial_cost, stop_error = config.stop_error, "annealing started");

        for k in 0..k_max {
            if current_cost <= config.stop_error {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let temperature = config.temperature(k);
            final_temperature = Some(temperature);

            let candidate = self.problem.neighbor(&current, rng);
            let candidate_cost = self.problem.cost(&candidate);

            let improving = candidate_cost < current_cost;
            let accept = improving
                || rng.random::<f64>()
                    < acceptance_probability(current_cost, candidate_cost, temperature);

            if improving {
                improving_moves += 1;
            }

            if accept {
                current = candidate;
                current_cost = candidate_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    trace!(k, best_cost, temperature, "new best");
                }
            }

            iterations += 1;

            if iterations.is_multiple_of(config.history_interval) {
                cost_history.push(best_cost);
            }
        }

        let converged = !cancelled && current_cost <= config.stop_error;

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        debug!(
            iterations,
            best_cost, accepted_moves, improving_moves, converged, cancelled, "annealing finished"
        );

        AnnealResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            final_temperature,
            accepted_moves,
            improving_moves,
            converged,
            cancelled,
            cost_history,
        }
    }
}
