//! Run parameters for one colony run.

use crate::error::{AntForgeError, Result};

/// Smallest city count with a meaningful tour.
pub const MIN_CITY_COUNT: usize = 3;

/// Default pheromone evaporation rate.
pub const DEFAULT_EVAPORATION_RATE: f64 = 0.1;

/// Default pheromone influence exponent.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Default distance influence exponent.
pub const DEFAULT_BETA: f64 = 2.0;

/// Parameters supplied once at run start.
///
/// # Example
///
/// ```
/// use antforge_core::RunParameters;
///
/// let params = RunParameters::new(4, 100, 50).with_beta(3.0);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.evaporation_rate, 0.1);
///
/// assert!(RunParameters::new(2, 100, 50).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunParameters {
    pub city_count: usize,
    pub iteration_count: usize,
    pub ant_count: usize,
    /// Fraction of pheromone removed per iteration, in `(0, 1)`.
    pub evaporation_rate: f64,
    /// Pheromone influence exponent.
    pub alpha: f64,
    /// Distance influence exponent.
    pub beta: f64,
}

impl RunParameters {
    /// Creates parameters with the default evaporation rate, alpha and beta.
    pub fn new(city_count: usize, iteration_count: usize, ant_count: usize) -> Self {
        Self {
            city_count,
            iteration_count,
            ant_count,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Checks every precondition of a run.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidParameters`] when `city_count < 3`,
    /// `ant_count < 1`, `iteration_count < 1`, the evaporation rate lies
    /// outside `(0, 1)`, or alpha/beta are negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        if self.city_count < MIN_CITY_COUNT {
            return Err(AntForgeError::InvalidParameters(format!(
                "city_count must be at least {}, got {}",
                MIN_CITY_COUNT, self.city_count
            )));
        }
        if self.ant_count < 1 {
            return Err(AntForgeError::InvalidParameters(
                "ant_count must be at least 1".to_string(),
            ));
        }
        if self.iteration_count < 1 {
            return Err(AntForgeError::InvalidParameters(
                "iteration_count must be at least 1".to_string(),
            ));
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(AntForgeError::InvalidParameters(format!(
                "evaporation_rate must lie in (0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(AntForgeError::InvalidParameters(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(AntForgeError::InvalidParameters(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}
