//! Tests for the colony engine.

use std::sync::{mpsc, Arc, Mutex};

use super::*;
use crate::event::{CountingEventListener, RecordingEventListener, RunEvent};
use antforge_test::exact::brute_force_optimum;
use antforge_test::instances::{
    coincident_matrix, reference_matrix, triangle_matrix, zero_matrix, REFERENCE_OPTIMUM,
};
use antforge_test::random::random_symmetric_matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn colony(city_count: usize, iterations: usize, ants: usize, seed: u64) -> AntColony {
    AntColony::new(RunParameters::new(city_count, iterations, ants))
        .unwrap()
        .with_seed(seed)
}

#[test]
fn test_rejects_invalid_parameters() {
    assert!(matches!(
        AntColony::new(RunParameters::new(2, 10, 5)),
        Err(AntForgeError::InvalidParameters(_))
    ));
    assert!(matches!(
        AntColony::new(RunParameters::new(4, 0, 5)),
        Err(AntForgeError::InvalidParameters(_))
    ));
    assert!(matches!(
        AntColony::new(RunParameters::new(4, 10, 0)),
        Err(AntForgeError::InvalidParameters(_))
    ));
    assert!(matches!(
        AntColony::new(RunParameters::new(4, 10, 5).with_evaporation_rate(1.0)),
        Err(AntForgeError::InvalidParameters(_))
    ));
    assert!(matches!(
        AntColony::new(RunParameters::new(4, 10, 5).with_beta(f64::NAN)),
        Err(AntForgeError::InvalidParameters(_))
    ));
}

#[test]
fn test_dimension_mismatch_leaves_engine_idle() {
    let colony = colony(5, 10, 5, 0);
    let err = colony.solve(&reference_matrix()).unwrap_err();

    assert_eq!(
        err,
        AntForgeError::DimensionMismatch {
            expected: 5,
            actual: 4
        }
    );
    assert_eq!(colony.run_state(), RunState::Idle);
}

#[test]
fn test_parallel_requires_batched() {
    let colony = colony(4, 10, 5, 0).with_construction(ConstructionMode::Parallel);
    assert!(matches!(
        colony.solve(&reference_matrix()),
        Err(AntForgeError::InvalidParameters(_))
    ));
    assert_eq!(colony.run_state(), RunState::Idle);
}

#[test]
fn test_rejects_invalid_initial_pheromone() {
    let colony = colony(4, 10, 5, 0).with_initial_pheromone(0.0);
    assert!(matches!(
        colony.solve(&reference_matrix()),
        Err(AntForgeError::InvalidParameters(_))
    ));
}

#[test]
fn test_state_transitions_and_terminal_completion() {
    let colony = colony(4, 5, 3, 0);
    assert_eq!(colony.run_state(), RunState::Idle);

    let result = colony.solve(&reference_matrix()).unwrap();
    assert_eq!(result.iterations_completed, 5);
    assert_eq!(colony.run_state(), RunState::Completed);
    assert!(colony.handle().is_completed());

    assert!(matches!(
        colony.solve(&reference_matrix()),
        Err(AntForgeError::InvalidState(_))
    ));
}

/// Blocks the solving thread at its first progress event until released.
#[derive(Debug)]
struct PauseAtFirstProgress {
    reached: Mutex<Option<mpsc::Sender<()>>>,
    resume: Mutex<mpsc::Receiver<()>>,
}

impl ColonyEventListener for PauseAtFirstProgress {
    fn on_improvement(&self, _event: &ImprovementEvent, _best: &crate::BestSolution) {}

    fn on_progress(&self, _event: &ProgressEvent) {
        let reached = self.reached.lock().unwrap().take();
        if let Some(reached) = reached {
            reached.send(()).unwrap();
            self.resume.lock().unwrap().recv().unwrap();
        }
    }
}

#[test]
fn test_rejects_reentrant_run() {
    let (reached_tx, reached_rx) = mpsc::channel();
    let (resume_tx, resume_rx) = mpsc::channel();
    let pause = Arc::new(PauseAtFirstProgress {
        reached: Mutex::new(Some(reached_tx)),
        resume: Mutex::new(resume_rx),
    });

    let colony = Arc::new(colony(4, 3, 2, 0).with_listener(pause));
    let distances = reference_matrix();

    let worker = {
        let colony = Arc::clone(&colony);
        let distances = distances.clone();
        std::thread::spawn(move || colony.solve(&distances))
    };

    reached_rx.recv().unwrap();
    assert_eq!(colony.run_state(), RunState::Running);
    assert!(colony.handle().is_running());
    assert_eq!(
        colony.solve(&distances).unwrap_err(),
        AntForgeError::AlreadyRunning
    );

    resume_tx.send(()).unwrap();
    let result = worker.join().unwrap().unwrap();
    assert_eq!(result.iterations_completed, 3);
    assert_eq!(colony.run_state(), RunState::Completed);
}

#[test]
fn test_progress_events() {
    let recorder = Arc::new(RecordingEventListener::new());
    let colony = colony(4, 25, 3, 1).with_listener(recorder.clone());
    colony.solve(&reference_matrix()).unwrap();

    let progress = recorder.progress();
    assert_eq!(progress.len(), 25);
    for (i, event) in progress.iter().enumerate() {
        assert_eq!(event.iteration_index, i);
    }
    assert!(progress
        .windows(2)
        .all(|w| w[0].fraction_complete < w[1].fraction_complete));
    assert_eq!(progress.last().map(|p| p.fraction_complete), Some(1.0));
}

#[test]
fn test_event_order() {
    let recorder = Arc::new(RecordingEventListener::new());
    let colony = colony(6, 20, 4, 3).with_listener(recorder.clone());
    let distances = random_symmetric_matrix(6, &mut StdRng::seed_from_u64(3));
    let result = colony.solve(&distances).unwrap();

    let events = recorder.events();
    assert!(matches!(events.first(), Some(RunEvent::Started(_))));
    assert!(matches!(events.last(), Some(RunEvent::Completed(_))));
    assert_eq!(events.iter().filter(|e| e.is_completed()).count(), 1);

    // Improvements arrive before the progress event of their iteration.
    let mut progress_seen = 0;
    for event in &events {
        match event {
            RunEvent::Progress(_) => progress_seen += 1,
            RunEvent::Improvement { event, best } => {
                assert_eq!(event.iteration_index, progress_seen);
                assert_eq!(event.distance, best.distance);
            }
            _ => {}
        }
    }

    // The completion carries the last improvement.
    let last = recorder.improvements().last().copied().unwrap();
    assert_eq!(result.best_distance(), last.distance);
    assert_eq!(result.history.last().copied(), Some(last));
}

#[test]
fn test_improvements_are_strictly_decreasing() {
    let mut rng = StdRng::seed_from_u64(17);
    for seed in 0..10 {
        let distances = random_symmetric_matrix(8, &mut rng);
        let result = colony(8, 30, 10, seed).solve(&distances).unwrap();

        assert!(!result.history.is_empty());
        assert!(result
            .history
            .windows(2)
            .all(|w| w[1].distance < w[0].distance));
        let best = result.best.as_ref().unwrap();
        assert!(best.tour.is_valid(8));
        assert_eq!(distances.tour_length(&best.tour), best.distance);
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let distances = random_symmetric_matrix(7, &mut StdRng::seed_from_u64(5));
    let a = colony(7, 40, 8, 1234).solve(&distances).unwrap();
    let b = colony(7, 40, 8, 1234).solve(&distances).unwrap();

    assert_eq!(a.best, b.best);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_reference_optimum_found_in_most_runs() {
    let distances = reference_matrix();
    let found = (0..100)
        .filter(|&seed| {
            let result = colony(4, 100, 50, seed).solve(&distances).unwrap();
            result.best_distance() == REFERENCE_OPTIMUM
        })
        .count();
    assert!(found >= 95, "optimum found in {} of 100 runs", found);
}

#[test]
fn test_matches_brute_force_on_small_instances() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in 3..7 {
        let distances = random_symmetric_matrix(n, &mut rng);
        let (_, optimum) = brute_force_optimum(&distances).unwrap();
        let result = colony(n, 100, 20, n as u64).solve(&distances).unwrap();
        assert!(result.best_distance() >= optimum);
        assert_eq!(result.best_distance(), optimum);
    }
}

#[test]
fn test_three_cities_best_after_first_ant() {
    let recorder = Arc::new(RecordingEventListener::new());
    let colony = colony(3, 10, 5, 8).with_listener(recorder.clone());
    let result = colony.solve(&triangle_matrix()).unwrap();

    let improvements = recorder.improvements();
    assert_eq!(improvements.len(), 1);
    assert_eq!(improvements[0].iteration_index, 0);
    assert_eq!(improvements[0].distance, 12.0);
    assert_eq!(result.best_distance(), 12.0);
    assert_eq!(result.statistics.tours_constructed, 50);
}

#[test]
fn test_zero_distance_matrix_stays_finite() {
    let colony = colony(4, 10, 3, 2).with_environment_mode(EnvironmentMode::FullAssert);
    let result = colony.solve(&zero_matrix(4)).unwrap();

    assert_eq!(result.best_distance(), 0.0);
    assert_eq!(result.history.len(), 1);
    assert_eq!(result.statistics.skipped_deposits, 30);
}

#[test]
fn test_coincident_cities_run_cleanly() {
    let colony = colony(4, 20, 5, 4).with_environment_mode(EnvironmentMode::FullAssert);
    let result = colony.solve(&coincident_matrix()).unwrap();
    let best = result.best.unwrap();
    assert!(best.tour.is_valid(4));
    assert_eq!(best.distance, 16.0);
}

#[test]
fn test_asymmetric_matrix_does_not_crash() {
    let distances = DistanceMatrix::from_rows(vec![
        vec![0.0, 1.0, 9.0, 4.0],
        vec![7.0, 0.0, 2.0, 8.0],
        vec![3.0, 6.0, 0.0, 3.0],
        vec![5.0, 2.0, 9.0, 0.0],
    ])
    .unwrap();
    let result = colony(4, 30, 5, 6)
        .with_environment_mode(EnvironmentMode::FullAssert)
        .solve(&distances)
        .unwrap();
    let best = result.best.unwrap();
    assert_eq!(distances.tour_length(&best.tour), best.distance);
}

#[test]
fn test_batched_sequential_matches_parallel() {
    let distances = random_symmetric_matrix(9, &mut StdRng::seed_from_u64(21));
    let sequential = colony(9, 30, 16, 77)
        .with_deposit_schedule(DepositSchedule::Batched)
        .solve(&distances)
        .unwrap();
    let parallel = colony(9, 30, 16, 77)
        .with_deposit_schedule(DepositSchedule::Batched)
        .with_construction(ConstructionMode::Parallel)
        .solve(&distances)
        .unwrap();

    assert_eq!(sequential.best, parallel.best);
    assert_eq!(sequential.history, parallel.history);
    assert_eq!(parallel.statistics.tours_constructed, 30 * 16);
}

/// Requests termination once a given iteration finishes.
#[derive(Debug)]
struct CancelAfter {
    handle: ColonyHandle,
    iteration_index: usize,
}

impl ColonyEventListener for CancelAfter {
    fn on_improvement(&self, _event: &ImprovementEvent, _best: &crate::BestSolution) {}

    fn on_progress(&self, event: &ProgressEvent) {
        if event.iteration_index == self.iteration_index {
            self.handle.terminate_early();
        }
    }
}

#[test]
fn test_cancellation_between_iterations() {
    let counter = Arc::new(CountingEventListener::new());
    let mut colony = colony(4, 100, 5, 9);
    let handle = colony.handle();
    colony.add_listener(Arc::new(CancelAfter {
        handle,
        iteration_index: 4,
    }));
    colony.add_listener(counter.clone());

    let result = colony.solve(&reference_matrix()).unwrap();

    assert!(result.terminated_early);
    assert_eq!(result.iterations_completed, 5);
    assert_eq!(counter.progress_count(), 5);
    assert_eq!(counter.completed_count(), 1);
    assert_eq!(colony.run_state(), RunState::Completed);
    assert!(result.best.is_some());
}

#[test]
fn test_cancellation_on_last_iteration_is_not_early() {
    let mut colony = colony(4, 3, 2, 9);
    let handle = colony.handle();
    colony.add_listener(Arc::new(CancelAfter {
        handle,
        iteration_index: 2,
    }));

    let result = colony.solve(&reference_matrix()).unwrap();
    assert!(!result.terminated_early);
    assert_eq!(result.iterations_completed, 3);
}

#[test]
fn test_cancellation_before_start() {
    let counter = Arc::new(CountingEventListener::new());
    let colony = colony(4, 10, 5, 0).with_listener(counter.clone());
    colony.handle().terminate_early();

    let result = colony.solve(&reference_matrix()).unwrap();

    assert!(result.terminated_early);
    assert_eq!(result.iterations_completed, 0);
    assert!(result.is_empty());
    assert_eq!(result.best_distance(), f64::INFINITY);
    assert_eq!(counter.started_count(), 1);
    assert_eq!(counter.progress_count(), 0);
    assert_eq!(counter.completed_count(), 1);
}

#[test]
fn test_statistics_match_run() {
    let result = colony(5, 12, 7, 3)
        .solve(&random_symmetric_matrix(5, &mut StdRng::seed_from_u64(1)))
        .unwrap();

    assert_eq!(result.statistics.iteration_count, 12);
    assert_eq!(result.statistics.tours_constructed, 84);
    assert_eq!(result.statistics.skipped_deposits, 0);
    assert_eq!(result.statistics.improvement_count(), result.history.len());
    assert_eq!(
        result.statistics.best_distance(),
        Some(result.best_distance())
    );
}

#[test]
fn test_from_config() {
    let config = ColonyConfig::from_toml_str(
        r#"
        environment_mode = "reproducible"

        [colony]
        ant_count = 10
        iteration_count = 15
        deposit_schedule = "batched"
        construction = "parallel"
        "#,
    )
    .unwrap();

    let colony = AntColony::from_config(&config, 4).unwrap();
    assert_eq!(colony.params().ant_count, 10);
    assert_eq!(colony.seed(), Some(DEFAULT_RANDOM_SEED));

    let first = colony.solve(&reference_matrix()).unwrap();
    let second = AntColony::from_config(&config, 4)
        .unwrap()
        .solve(&reference_matrix())
        .unwrap();
    assert_eq!(first.history, second.history);
    assert_eq!(first.iterations_completed, 15);
}

#[test]
fn test_from_config_rejects_invalid() {
    let mut config = ColonyConfig::default();
    config.colony.construction = ConstructionMode::Parallel;
    assert!(matches!(
        AntColony::from_config(&config, 4),
        Err(AntForgeError::InvalidParameters(_))
    ));

    let config = ColonyConfig::default();
    assert!(matches!(
        AntColony::from_config(&config, 2),
        Err(AntForgeError::InvalidParameters(_))
    ));
}
