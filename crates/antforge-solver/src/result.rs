//! Outcome of a colony run.

use antforge_core::Tour;

use crate::event::ImprovementEvent;
use crate::statistics::ColonyStatistics;

/// Shortest tour seen so far and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    pub tour: Tour,
    pub distance: f64,
}

impl BestSolution {
    pub fn new(tour: Tour, distance: f64) -> Self {
        Self { tour, distance }
    }
}

/// Final state of a run, carried by the completion signal.
///
/// `best` is `None` only when the run was cancelled before any ant built a
/// tour. Otherwise it equals the last entry of `history`.
#[derive(Debug, Clone)]
pub struct ColonyResult {
    pub best: Option<BestSolution>,
    /// Every improvement in the order it happened.
    pub history: Vec<ImprovementEvent>,
    pub iterations_completed: usize,
    pub terminated_early: bool,
    pub statistics: ColonyStatistics,
}

impl ColonyResult {
    /// Best distance, or `f64::INFINITY` if no tour was built.
    pub fn best_distance(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.distance)
    }

    pub fn best_tour(&self) -> Option<&Tour> {
        self.best.as_ref().map(|b| &b.tour)
    }

    /// Returns true if the run never improved on `+inf`.
    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }
}
