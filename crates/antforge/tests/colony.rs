//! Integration tests for the public entry points.

use antforge::prelude::*;
use antforge::{AntForgeError, ColonyTask};
use antforge_test::instances::{reference_matrix, REFERENCE_OPTIMUM};
use antforge_test::random::random_symmetric_matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_config(seed: u64) -> ColonyConfig {
    ColonyConfig::new()
        .with_random_seed(seed)
        .with_colony(ColonyParams {
            ant_count: 50,
            iteration_count: 100,
            ..ColonyParams::default()
        })
}

#[test]
fn solves_reference_instance() {
    let result = run_colony_with_config(&reference_matrix(), &seeded_config(1)).unwrap();

    let best = result.best.expect("a tour");
    assert_eq!(best.distance, REFERENCE_OPTIMUM);
    assert!(best.tour.is_valid(4));
    assert_eq!(result.iterations_completed, 100);
    assert_eq!(result.history.last().map(|e| e.distance), Some(best.distance));
}

#[test]
fn default_entry_point_uses_defaults_without_file() {
    // No antforge.toml exists in the crate directory, so defaults apply.
    let result = run_colony(&reference_matrix()).unwrap();
    assert_eq!(result.iterations_completed, 100);
    assert_eq!(result.statistics.tours_constructed, 100 * 20);
}

#[test]
fn labelled_tour_rendering() {
    let result = run_colony_with_config(&reference_matrix(), &seeded_config(2)).unwrap();
    let cities = City::labelled(4);
    let tour = result.best_tour().unwrap();
    let rendered = tour.display_with(&cities).to_string();

    assert_eq!(rendered.matches(" → ").count(), 4);
    let start = tour.start().unwrap();
    assert!(rendered.starts_with(cities[start].label()));
    assert!(rendered.ends_with(cities[start].label()));
}

#[test]
fn yaml_config_drives_the_run() {
    let config = ColonyConfig::from_yaml_str(
        r#"
environment_mode: full_assert
colony:
  ant_count: 12
  iteration_count: 7
  deposit_schedule: batched
  construction: parallel
"#,
    )
    .unwrap();

    let a = run_colony_with_config(&reference_matrix(), &config).unwrap();
    let b = run_colony_with_config(&reference_matrix(), &config).unwrap();
    assert_eq!(a.iterations_completed, 7);
    assert_eq!(a.statistics.tours_constructed, 84);
    assert_eq!(a.history, b.history);
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let config = ColonyConfig::new().with_colony(ColonyParams {
        evaporation_rate: 1.5,
        ..ColonyParams::default()
    });
    assert!(matches!(
        run_colony_with_config(&reference_matrix(), &config),
        Err(AntForgeError::InvalidParameters(_))
    ));
}

#[test]
fn streaming_run_delivers_ordered_events() {
    let mut rng = StdRng::seed_from_u64(4);
    let distances = random_symmetric_matrix(10, &mut rng);
    let mut config = seeded_config(8);
    config.colony.iteration_count = 20;
    config.colony.ant_count = 10;

    let ColonyTask {
        handle: _,
        mut events,
        ..
    } = run_colony_streaming(distances, &config).unwrap();

    let mut received = Vec::new();
    while let Some(event) = events.blocking_recv() {
        received.push(event);
    }

    assert!(matches!(received.first(), Some(RunEvent::Started(_))));
    let progress: Vec<f64> = received
        .iter()
        .filter_map(|e| match e {
            RunEvent::Progress(p) => Some(p.fraction_complete),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 20);
    assert_eq!(progress.last().copied(), Some(1.0));
    assert!(matches!(received.last(), Some(RunEvent::Completed(r)) if !r.terminated_early));
}
