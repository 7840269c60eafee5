//! Core trait for annealing problems.

use rand::{Rng, RngCore};

/// Defines a problem the annealer can optimize.
///
/// The user implements neighbor generation and cost evaluation.
/// The annealer handles temperature, acceptance and best-state tracking.
///
/// # Minimization
///
/// The annealer minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_bluenoise::sa::AnnealProblem;
///
/// struct SortProblem;
///
/// impl AnnealProblem for SortProblem {
///     type Solution = Vec<usize>;
///
///     fn cost(&self, perm: &Vec<usize>) -> f64 {
///         perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
///     }
///
///     fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
///         let mut new = perm.clone();
///         let i = rng.random_range(0..new.len());
///         let j = rng.random_range(0..new.len());
///         new.swap(i, j);
///         new
///     }
/// }
/// ```
pub trait AnnealProblem {
    /// The state representation. Copied by value for candidates and snapshots.
    type Solution: Clone;

    /// Computes the cost of a state. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the given state.
    ///
    /// Must not mutate `solution`; the annealer keeps it for comparison
    /// and rejection.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}

/// Adapts a pair of closures into an [`AnnealProblem`].
///
/// The neighbour closure receives the annealer's generator as a trait
/// object so it can draw from the same stream as the acceptance rule.
pub struct FnProblem<S, C, N>
where
    C: Fn(&S) -> f64,
    N: Fn(&S, &mut dyn RngCore) -> S,
{
    cost: C,
    neighbour: N,
    _state: std::marker::PhantomData<fn(&S) -> S>,
}

impl<S, C, N> FnProblem<S, C, N>
where
    C: Fn(&S) -> f64,
    N: Fn(&S, &mut dyn RngCore) -> S,
{
    pub fn new(cost: C, neighbour: N) -> Self {
        Self {
            cost,
            neighbour,
            _state: std::marker::PhantomData,
        }
    }
}

impl<S, C, N> AnnealProblem for FnProblem<S, C, N>
where
    S: Clone,
    C: Fn(&S) -> f64,
    N: Fn(&S, &mut dyn RngCore) -> S,
{
    type Solution = S;

    fn cost(&self, solution: &S) -> f64 {
        (self.cost)(solution)
    }

    fn neighbor<R: Rng>(&self, solution: &S, rng: &mut R) -> S {
        (self.neighbour)(solution, rng)
    }
}
