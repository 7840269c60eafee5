//! Annealer configuration and cooling schedules.

use crate::error::{BlueNoiseError, BlueNoiseResult};

/// Cooling schedule mapping the iteration index `k` to a temperature.
///
/// Both schedules are derived from the iteration budget `k_max`; there is
/// no separate initial-temperature knob. Every schedule stays strictly
/// positive inside the loop, so the acceptance exponent never divides by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Linear cooling: `T(k) = k_max - k`.
    ///
    /// Starts at `k_max` and reaches 1 on the final iteration.
    #[default]
    Linear,

    /// Geometric cooling: `T(k) = k_max * alpha^k`.
    ///
    /// Floored at `f64::MIN_POSITIVE`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },
}

impl CoolingSchedule {
    /// Temperature at iteration `k` of a run with budget `k_max`.
    pub fn temperature(&self, k: usize, k_max: usize) -> f64 {
        match *self {
            CoolingSchedule::Linear => k_max.saturating_sub(k) as f64,
            CoolingSchedule::Geometric { alpha } => {
                let exponent = i32::try_from(k).unwrap_or(i32::MAX);
                (k_max as f64 * alpha.powi(exponent)).max(f64::MIN_POSITIVE)
            }
        }
    }
}

/// Configuration for the annealer.
///
/// # Examples
///
/// ```
/// use u_bluenoise::sa::{AnnealConfig, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_max_iterations(5000)
///     .with_stop_error(1e-4)
///     .with_cooling(CoolingSchedule::Linear)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Iteration budget (`k_max`). Also spans the cooling schedule.
    pub max_iterations: usize,

    /// Stopping error (`e_max`). The loop ends once the current cost is
    /// at or below this value.
    pub stop_error: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Best cost is sampled into the history every this many iterations.
    pub history_interval: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            stop_error: 1e-3,
            cooling: CoolingSchedule::default(),
            history_interval: 100,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_stop_error(mut self, e: f64) -> Self {
        self.stop_error = e;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Temperature at iteration `k` under this configuration.
    pub fn temperature(&self, k: usize) -> f64 {
        self.cooling.temperature(k, self.max_iterations)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> BlueNoiseResult<()> {
        if !self.stop_error.is_finite() || self.stop_error < 0.0 {
            return Err(BlueNoiseError::validation(format!(
                "stop_error must be finite and non-negative, got {}",
                self.stop_error
            )));
        }
        if self.history_interval == 0 {
            return Err(BlueNoiseError::validation("history_interval must be positive"));
        }
        if let CoolingSchedule::Geometric { alpha } = self.cooling {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(BlueNoiseError::validation(format!(
                    "geometric alpha must be in (0, 1), got {alpha}"
                )));
            }
        }
        Ok(())
    }
}
