//! Pheromone model: trail strength on every ordered pair of cities.
//!
//! Trails start uniform, grow by deposition along constructed tours and
//! decay multiplicatively by evaporation once per iteration. Entries stay
//! finite and non-negative for any evaporation rate in `(0, 1)`.

use antforge_core::Tour;

/// Trail strength every edge starts a run with.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Square, row-major matrix of pheromone levels owned by a single run.
///
/// # Example
///
/// ```
/// use antforge_core::Tour;
/// use antforge_solver::pheromone::PheromoneMatrix;
///
/// let mut trails = PheromoneMatrix::new(3);
/// trails.deposit_tour(&Tour::closing(vec![0, 1, 2]), 4.0);
/// assert_eq!(trails.get(0, 1), 1.25);
/// assert_eq!(trails.get(1, 0), 1.25);
///
/// trails.evaporate(0.5);
/// assert_eq!(trails.get(0, 1), 0.625);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    dimension: usize,
    trails: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n`×`n` matrix with every entry at [`INITIAL_PHEROMONE`].
    pub fn new(dimension: usize) -> Self {
        Self::with_initial(dimension, INITIAL_PHEROMONE)
    }

    /// Creates an `n`×`n` matrix with every entry at `level`.
    pub fn with_initial(dimension: usize, level: f64) -> Self {
        Self {
            dimension,
            trails: vec![level; dimension * dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.trails[from * self.dimension + to]
    }

    /// Adds `amount` to both `(a, b)` and `(b, a)`.
    ///
    /// Amounts that are not finite and positive are ignored so that no
    /// degenerate value can reach the trails. Returns whether anything was
    /// deposited.
    pub fn deposit(&mut self, a: usize, b: usize, amount: f64) -> bool {
        if !(amount.is_finite() && amount > 0.0) {
            return false;
        }
        self.trails[a * self.dimension + b] += amount;
        self.trails[b * self.dimension + a] += amount;
        true
    }

    /// Reinforces every edge of `tour` by `1 / tour_distance`.
    ///
    /// Skipped entirely when the distance is zero or not finite. Returns the
    /// amount deposited per edge.
    pub fn deposit_tour(&mut self, tour: &Tour, tour_distance: f64) -> f64 {
        let amount = deposit_amount(tour_distance);
        if amount == 0.0 {
            return 0.0;
        }
        for (from, to) in tour.edges() {
            self.deposit(from, to, amount);
        }
        amount
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let retained = 1.0 - rate;
        for trail in &mut self.trails {
            *trail *= retained;
        }
    }

    /// Returns true if every entry is finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.trails.iter().all(|t| t.is_finite() && *t >= 0.0)
    }

    /// Largest trail; reported with each progress event.
    pub fn max_trail(&self) -> f64 {
        self.trails.iter().copied().fold(0.0, f64::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.trails.iter().copied()
    }
}

/// Pheromone laid per edge by a tour of the given length.
///
/// Zero for zero-length or non-finite tours, which would otherwise produce
/// an infinite deposit.
pub fn deposit_amount(tour_distance: f64) -> f64 {
    if tour_distance.is_finite() && tour_distance > 0.0 {
        1.0 / tour_distance
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "pheromone_tests.rs"]
mod tests;
