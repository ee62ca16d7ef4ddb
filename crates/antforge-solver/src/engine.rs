//! The colony engine: runs iterations of tour construction, best-tour
//! tracking and pheromone updates over one distance matrix.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use antforge_config::{
    ColonyConfig, ConstructionMode, DepositSchedule, EnvironmentMode, DEFAULT_RANDOM_SEED,
};
use antforge_core::{AntForgeError, DistanceMatrix, Result, RunParameters, Tour};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::event::{ColonyEventListener, ColonyEventSupport, ImprovementEvent, ProgressEvent};
use crate::handle::{ColonyHandle, RunState};
use crate::pheromone::INITIAL_PHEROMONE;
use crate::result::ColonyResult;
use crate::scope::{ColonyScope, IterationScope};
use crate::statistics::StatisticsCollector;
use crate::termination::{
    ExternalTermination, IterationCountTermination, OrTermination, Termination,
};

/// An Ant Colony Optimization engine for one run.
///
/// Parameters are validated at construction. [`AntColony::solve`] moves the
/// engine from [`RunState::Idle`] to [`RunState::Running`] and finally to
/// [`RunState::Completed`]; a completed engine cannot run again.
///
/// # Example
///
/// ```
/// use antforge_core::{DistanceMatrix, RunParameters};
/// use antforge_solver::AntColony;
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let colony = AntColony::new(RunParameters::new(4, 100, 50))
///     .unwrap()
///     .with_seed(42);
/// let result = colony.solve(&distances).unwrap();
///
/// assert_eq!(result.best_distance(), 80.0);
/// assert_eq!(result.iterations_completed, 100);
/// assert!(!result.terminated_early);
/// ```
pub struct AntColony {
    params: RunParameters,
    seed: Option<u64>,
    environment_mode: EnvironmentMode,
    initial_pheromone: f64,
    deposit_schedule: DepositSchedule,
    construction: ConstructionMode,
    events: ColonyEventSupport,
    state: Arc<AtomicU8>,
    terminate_early: Arc<AtomicBool>,
}

impl AntColony {
    /// Creates an idle engine after checking every run precondition.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidParameters`] for any parameter
    /// outside its allowed range.
    pub fn new(params: RunParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            seed: None,
            environment_mode: EnvironmentMode::default(),
            initial_pheromone: INITIAL_PHEROMONE,
            deposit_schedule: DepositSchedule::default(),
            construction: ConstructionMode::default(),
            events: ColonyEventSupport::new(),
            state: Arc::new(AtomicU8::new(RunState::Idle as u8)),
            terminate_early: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Creates an engine from a loaded configuration for `city_count` cities.
    pub fn from_config(config: &ColonyConfig, city_count: usize) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AntForgeError::InvalidParameters(e.to_string()))?;

        let mut colony = Self::new(config.run_parameters(city_count))?;
        colony.seed = config.effective_seed();
        colony.environment_mode = config.environment_mode;
        colony.initial_pheromone = config.colony.initial_pheromone;
        colony.deposit_schedule = config.colony.deposit_schedule;
        colony.construction = config.colony.construction;
        Ok(colony)
    }

    /// Fixes the random seed, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_deposit_schedule(mut self, schedule: DepositSchedule) -> Self {
        self.deposit_schedule = schedule;
        self
    }

    pub fn with_construction(mut self, construction: ConstructionMode) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn ColonyEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ColonyEventListener>) {
        self.events.add_listener(listener);
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn run_state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Returns a handle for observing and cancelling this engine's run.
    pub fn handle(&self) -> ColonyHandle {
        ColonyHandle::new(Arc::clone(&self.state), Arc::clone(&self.terminate_early))
    }

    /// Runs the colony against `distances`.
    ///
    /// Events are delivered to registered listeners on the calling thread:
    /// run started, then per iteration any improvements followed by one
    /// progress event, then run completed. The matrix is borrowed for the
    /// whole run and cannot change underneath it.
    ///
    /// # Errors
    ///
    /// - [`AntForgeError::DimensionMismatch`] if the matrix size differs
    ///   from `city_count`; the engine stays idle.
    /// - [`AntForgeError::InvalidParameters`] for an invalid initial
    ///   pheromone or parallel construction without batched deposits; the
    ///   engine stays idle.
    /// - [`AntForgeError::AlreadyRunning`] if a run is in progress.
    /// - [`AntForgeError::InvalidState`] if this engine already completed.
    /// - [`AntForgeError::Internal`] if full-assert mode detects a broken
    ///   invariant; the engine is left completed.
    pub fn solve(&self, distances: &DistanceMatrix) -> Result<ColonyResult> {
        self.check_preconditions(distances)?;
        self.begin_run()?;
        let _guard = CompletionGuard(&self.state);

        let seed = self.seed.or_else(|| {
            (self.environment_mode != EnvironmentMode::NonReproducible)
                .then_some(DEFAULT_RANDOM_SEED)
        });
        let collector = Arc::new(StatisticsCollector::new());
        let mut scope = match seed {
            Some(seed) => ColonyScope::with_seed(distances, self.params, seed),
            None => ColonyScope::new(distances, self.params),
        }
        .with_initial_pheromone(self.initial_pheromone)
        .with_statistics(Arc::clone(&collector));
        scope.set_terminate_early_flag(Arc::clone(&self.terminate_early));

        info!(
            event = "run_start",
            city_count = self.params.city_count,
            ant_count = self.params.ant_count,
            iteration_count = self.params.iteration_count,
            seed = ?seed,
        );
        self.events.fire_run_started(&self.params);

        let termination = OrTermination::new((
            IterationCountTermination::new(self.params.iteration_count),
            ExternalTermination::new(Arc::clone(&self.terminate_early)),
        ));

        scope.start_solving();
        let terminated_early = loop {
            if termination.is_terminated(&scope) {
                break termination.is_early(&scope);
            }

            let iteration_index = scope.iterations_completed();
            self.run_iteration(&mut scope, iteration_index)?;
            scope.increment_iteration_count();

            let progress = ProgressEvent::new(iteration_index, self.params.iteration_count);
            debug!(
                event = "progress",
                iteration = iteration_index,
                percent = progress.percent(),
                distance = scope.best_distance(),
                max_trail = scope.trails().max_trail(),
            );
            self.events.fire_progress(&progress);
        };

        let (best, history, iterations_completed) = scope.into_outcome();
        let statistics = match Arc::try_unwrap(collector) {
            Ok(collector) => collector.into_statistics(),
            Err(shared) => shared.snapshot(),
        };

        let result = ColonyResult {
            best,
            history,
            iterations_completed,
            terminated_early,
            statistics,
        };

        info!(
            event = "run_end",
            distance = result.best_distance(),
            iterations = result.iterations_completed as u64,
            duration_ms = result.statistics.total_duration.as_millis() as u64,
            tours = result.statistics.tours_constructed,
            speed = result.statistics.tours_per_second(),
            terminated_early = result.terminated_early,
        );

        self.state.store(RunState::Completed as u8, Ordering::SeqCst);
        self.events.fire_run_completed(&result);
        Ok(result)
    }

    fn check_preconditions(&self, distances: &DistanceMatrix) -> Result<()> {
        if distances.dimension() != self.params.city_count {
            return Err(AntForgeError::DimensionMismatch {
                expected: self.params.city_count,
                actual: distances.dimension(),
            });
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(AntForgeError::InvalidParameters(format!(
                "initial pheromone must be finite and positive, got {}",
                self.initial_pheromone
            )));
        }
        if self.construction == ConstructionMode::Parallel
            && self.deposit_schedule == DepositSchedule::PerAnt
        {
            return Err(AntForgeError::InvalidParameters(
                "parallel construction requires batched deposits".to_string(),
            ));
        }
        Ok(())
    }

    fn begin_run(&self) -> Result<()> {
        match self.state.compare_exchange(
            RunState::Idle as u8,
            RunState::Running as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => Ok(()),
            Err(current) => match RunState::from_u8(current) {
                RunState::Running => Err(AntForgeError::AlreadyRunning),
                _ => Err(AntForgeError::InvalidState(
                    "engine has already completed a run; create a new instance".to_string(),
                )),
            },
        }
    }

    fn run_iteration(&self, scope: &mut ColonyScope<'_>, iteration_index: usize) -> Result<()> {
        match self.deposit_schedule {
            DepositSchedule::PerAnt => self.run_per_ant_iteration(scope, iteration_index),
            DepositSchedule::Batched => self.run_batched_iteration(scope, iteration_index),
        }
    }

    /// Each ant deposits right after its tour is scored, so later ants in
    /// the same iteration already see the reinforcement.
    fn run_per_ant_iteration(
        &self,
        scope: &mut ColonyScope<'_>,
        iteration_index: usize,
    ) -> Result<()> {
        let mut iteration = IterationScope::new(scope, iteration_index);
        for ant in 0..self.params.ant_count {
            let tour = iteration.colony_scope_mut().construct_tour();
            self.process_tour(&mut iteration, ant, &tour)?;
        }
        iteration.evaporate();
        self.assert_trails(&iteration)
    }

    /// Every ant builds against the iteration-start trails with its own
    /// generator; tours are then scored and deposited in ant order.
    fn run_batched_iteration(
        &self,
        scope: &mut ColonyScope<'_>,
        iteration_index: usize,
    ) -> Result<()> {
        let rngs = scope.fork_rngs(self.params.ant_count);
        let tours: Vec<Tour> = {
            let ant = scope.ant();
            match self.construction {
                ConstructionMode::Sequential => rngs
                    .into_iter()
                    .map(|mut rng| ant.construct(&mut rng))
                    .collect(),
                ConstructionMode::Parallel => rngs
                    .into_par_iter()
                    .map(|mut rng| ant.construct(&mut rng))
                    .collect(),
            }
        };

        let mut iteration = IterationScope::new(scope, iteration_index);
        for (ant, tour) in tours.iter().enumerate() {
            iteration.colony_scope().record_tour();
            self.process_tour(&mut iteration, ant, tour)?;
        }
        iteration.evaporate();
        self.assert_trails(&iteration)
    }

    /// Scores one tour, reports any improvement, then deposits along it.
    fn process_tour(
        &self,
        iteration: &mut IterationScope<'_, '_>,
        ant: usize,
        tour: &Tour,
    ) -> Result<()> {
        if self.environment_mode.is_asserted() {
            tour.validate(self.params.city_count).map_err(|e| {
                AntForgeError::Internal(format!("ant {} built an invalid tour: {}", ant, e))
            })?;
        }

        let (distance, improvement) = iteration.score_tour(tour);
        trace!(
            event = "tour",
            iteration = iteration.iteration_index(),
            ant = ant,
            distance = distance,
        );

        if let Some(event) = improvement {
            self.announce_improvement(iteration, &event);
        }

        iteration.deposit(tour, distance);
        Ok(())
    }

    fn announce_improvement(&self, iteration: &IterationScope<'_, '_>, event: &ImprovementEvent) {
        info!(
            event = "improvement",
            iteration = event.iteration_index,
            distance = event.distance,
        );
        if let Some(best) = iteration.colony_scope().best() {
            self.events.fire_improvement(event, best);
        }
    }

    fn assert_trails(&self, iteration: &IterationScope<'_, '_>) -> Result<()> {
        if self.environment_mode.is_asserted()
            && !iteration.colony_scope().trails().is_well_formed()
        {
            return Err(AntForgeError::Internal(format!(
                "pheromone trails not finite and non-negative after iteration {}",
                iteration.iteration_index()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AntColony {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AntColony")
            .field("params", &self.params)
            .field("seed", &self.seed)
            .field("environment_mode", &self.environment_mode)
            .field("deposit_schedule", &self.deposit_schedule)
            .field("construction", &self.construction)
            .field("state", &self.run_state())
            .field("events", &self.events)
            .finish()
    }
}

/// Leaves the engine completed however `solve` exits after starting.
struct CompletionGuard<'a>(&'a AtomicU8);

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(RunState::Completed as u8, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
