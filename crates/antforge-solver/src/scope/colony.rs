//! Run-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use antforge_core::{DistanceMatrix, RunParameters, Tour};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ant::Ant;
use crate::event::ImprovementEvent;
use crate::pheromone::PheromoneMatrix;
use crate::result::BestSolution;
use crate::statistics::StatisticsCollector;

/// Top-level scope for one colony run.
///
/// Borrows the distance matrix for its whole lifetime, so the matrix cannot
/// change while a run is in progress. Owns the pheromone trails exclusively.
pub struct ColonyScope<'a> {
    distances: &'a DistanceMatrix,
    params: RunParameters,
    trails: PheromoneMatrix,
    rng: StdRng,
    best: Option<BestSolution>,
    history: Vec<ImprovementEvent>,
    start_time: Option<Instant>,
    iterations_completed: usize,
    statistics: Option<Arc<StatisticsCollector>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl<'a> ColonyScope<'a> {
    pub fn new(distances: &'a DistanceMatrix, params: RunParameters) -> Self {
        Self::with_rng(distances, params, StdRng::from_os_rng())
    }

    pub fn with_seed(distances: &'a DistanceMatrix, params: RunParameters, seed: u64) -> Self {
        Self::with_rng(distances, params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(distances: &'a DistanceMatrix, params: RunParameters, rng: StdRng) -> Self {
        Self {
            distances,
            params,
            trails: PheromoneMatrix::new(distances.dimension()),
            rng,
            best: None,
            history: Vec::new(),
            start_time: None,
            iterations_completed: 0,
            statistics: None,
            terminate_early_flag: None,
        }
    }

    /// Resets every trail to `level`.
    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.trails = PheromoneMatrix::with_initial(self.distances.dimension(), level);
        self
    }

    pub fn with_statistics(mut self, collector: Arc<StatisticsCollector>) -> Self {
        self.statistics = Some(collector);
        self
    }

    pub fn statistics(&self) -> Option<&Arc<StatisticsCollector>> {
        self.statistics.as_ref()
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.iterations_completed = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn trails(&self) -> &PheromoneMatrix {
        &self.trails
    }

    pub fn trails_mut(&mut self) -> &mut PheromoneMatrix {
        &mut self.trails
    }

    /// An ant reading the current trails.
    pub fn ant(&self) -> Ant<'_> {
        Ant::new(
            self.distances,
            &self.trails,
            self.params.alpha,
            self.params.beta,
        )
    }

    /// Builds one tour against the current trails with the run RNG.
    pub fn construct_tour(&mut self) -> Tour {
        let ant = Ant::new(
            self.distances,
            &self.trails,
            self.params.alpha,
            self.params.beta,
        );
        let tour = ant.construct(&mut self.rng);
        self.record_tour();
        tour
    }

    /// Derives `count` independent generators from the run RNG.
    ///
    /// Each ant of a batched iteration draws from its own generator, so the
    /// tours do not depend on which thread builds them.
    pub fn fork_rngs(&mut self, count: usize) -> Vec<ChaCha8Rng> {
        (0..count)
            .map(|_| ChaCha8Rng::seed_from_u64(self.rng.random::<u64>()))
            .collect()
    }

    pub fn record_tour(&self) {
        if let Some(stats) = &self.statistics {
            stats.record_tour();
        }
    }

    pub fn record_skipped_deposit(&self) {
        if let Some(stats) = &self.statistics {
            stats.record_skipped_deposit();
        }
    }

    pub fn best(&self) -> Option<&BestSolution> {
        self.best.as_ref()
    }

    /// Best distance so far, `+inf` before the first tour.
    pub fn best_distance(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.distance)
    }

    /// Replaces the best solution if `distance` is strictly shorter.
    ///
    /// Ties keep the incumbent. Returns the improvement event when the
    /// best solution changed.
    pub fn offer_tour(
        &mut self,
        iteration_index: usize,
        tour: &Tour,
        distance: f64,
    ) -> Option<ImprovementEvent> {
        // NaN never compares less, so it cannot become the best.
        let improves = distance < self.best_distance();
        if !improves {
            return None;
        }

        self.best = Some(BestSolution::new(tour.clone(), distance));
        let event = ImprovementEvent {
            iteration_index,
            distance,
        };
        self.history.push(event);

        if let Some(stats) = &self.statistics {
            stats.record_improvement(iteration_index, distance);
        }
        Some(event)
    }

    pub fn history(&self) -> &[ImprovementEvent] {
        &self.history
    }

    pub fn increment_iteration_count(&mut self) -> usize {
        self.iterations_completed += 1;
        if let Some(stats) = &self.statistics {
            stats.record_iteration();
        }
        self.iterations_completed
    }

    pub fn iterations_completed(&self) -> usize {
        self.iterations_completed
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Consumes the scope, returning the best solution and history.
    pub fn into_outcome(self) -> (Option<BestSolution>, Vec<ImprovementEvent>, usize) {
        (self.best, self.history, self.iterations_completed)
    }
}
