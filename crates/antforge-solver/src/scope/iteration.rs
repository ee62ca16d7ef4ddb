//! Iteration-level scope.

use std::time::{Duration, Instant};

use antforge_core::Tour;

use super::ColonyScope;
use crate::event::ImprovementEvent;

/// Scope for a single iteration of the colony.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed distance matrix
/// * `'s` - Lifetime of the colony scope reference
pub struct IterationScope<'s, 'a> {
    colony_scope: &'s mut ColonyScope<'a>,
    iteration_index: usize,
    tour_count: usize,
    improvements: Vec<ImprovementEvent>,
    start_time: Instant,
}

impl<'s, 'a> IterationScope<'s, 'a> {
    pub fn new(colony_scope: &'s mut ColonyScope<'a>, iteration_index: usize) -> Self {
        Self {
            colony_scope,
            iteration_index,
            tour_count: 0,
            improvements: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn iteration_index(&self) -> usize {
        self.iteration_index
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Tours scored in this iteration.
    pub fn tour_count(&self) -> usize {
        self.tour_count
    }

    /// Improvements found in this iteration, in order.
    pub fn improvements(&self) -> &[ImprovementEvent] {
        &self.improvements
    }

    /// Scores `tour`, updates the best solution and returns its length
    /// together with the improvement, if any.
    pub fn score_tour(&mut self, tour: &Tour) -> (f64, Option<ImprovementEvent>) {
        self.tour_count += 1;
        let distance = self.colony_scope.distances().tour_length(tour);
        let improvement = self
            .colony_scope
            .offer_tour(self.iteration_index, tour, distance);
        if let Some(event) = improvement {
            self.improvements.push(event);
        }
        (distance, improvement)
    }

    /// Deposits `1 / distance` along `tour`. Returns false when the deposit
    /// was skipped for a degenerate length.
    pub fn deposit(&mut self, tour: &Tour, distance: f64) -> bool {
        let amount = self.colony_scope.trails_mut().deposit_tour(tour, distance);
        if amount == 0.0 {
            self.colony_scope.record_skipped_deposit();
            false
        } else {
            true
        }
    }

    /// Runs the once-per-iteration evaporation pass.
    pub fn evaporate(&mut self) {
        let rate = self.colony_scope.params().evaporation_rate;
        self.colony_scope.trails_mut().evaporate(rate);
    }

    pub fn colony_scope(&self) -> &ColonyScope<'a> {
        self.colony_scope
    }

    pub fn colony_scope_mut(&mut self) -> &mut ColonyScope<'a> {
        self.colony_scope
    }
}
