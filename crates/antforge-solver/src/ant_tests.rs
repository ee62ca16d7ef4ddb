//! Tests for ant tour construction.

use super::*;
use antforge_test::instances::{coincident_matrix, reference_matrix, triangle_matrix};
use antforge_test::random::random_symmetric_matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn candidates(scores: &[f64]) -> Vec<Candidate> {
    scores
        .iter()
        .enumerate()
        .map(|(city, &score)| Candidate { city, score })
        .collect()
}

#[test]
fn test_desirability() {
    let distances = reference_matrix();
    let mut trails = PheromoneMatrix::new(4);
    trails.deposit(0, 1, 1.0);

    let ant = Ant::new(&distances, &trails, 1.0, 2.0);
    // 2.0^1 * (1/10)^2
    assert!((ant.desirability(0, 1) - 0.02).abs() < 1e-12);
    // 1.0^1 * (1/20)^2
    assert!((ant.desirability(0, 3) - 0.0025).abs() < 1e-12);
}

#[test]
fn test_desirability_without_influence_is_uniform() {
    let distances = reference_matrix();
    let trails = PheromoneMatrix::new(4);
    let ant = Ant::new(&distances, &trails, 0.0, 0.0);
    assert_eq!(ant.desirability(0, 1), 1.0);
    assert_eq!(ant.desirability(2, 3), 1.0);
}

#[test]
fn test_constructed_tours_are_hamiltonian_cycles() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 3..9 {
        let distances = random_symmetric_matrix(n, &mut rng);
        let trails = PheromoneMatrix::new(n);
        let ant = Ant::new(&distances, &trails, 1.0, 2.0);
        for _ in 0..50 {
            let tour = ant.construct(&mut rng);
            assert_eq!(tour.cities().len(), n + 1);
            assert_eq!(tour.cities().first(), tour.cities().last());
            assert!(tour.is_valid(n), "invalid tour {:?}", tour);
        }
    }
}

#[test]
fn test_construction_is_deterministic_under_seed() {
    let distances = reference_matrix();
    let trails = PheromoneMatrix::new(4);
    let ant = Ant::new(&distances, &trails, 1.0, 2.0);

    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        assert_eq!(ant.construct(&mut a), ant.construct(&mut b));
    }
}

#[test]
fn test_triangle_tours_all_equal_length() {
    let distances = triangle_matrix();
    let trails = PheromoneMatrix::new(3);
    let ant = Ant::new(&distances, &trails, 1.0, 2.0);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        assert_eq!(distances.tour_length(&ant.construct(&mut rng)), 12.0);
    }
}

#[test]
fn test_zero_distance_hop_is_taken() {
    let distances = coincident_matrix();
    let trails = PheromoneMatrix::new(4);
    let ant = Ant::new(&distances, &trails, 1.0, 2.0);
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let tour = ant.construct(&mut rng);
        assert!(tour.is_valid(4));
        let cities = tour.cities();
        // Starting at 0 or 1 always moves straight to its twin.
        if cities[0] == 0 {
            assert_eq!(cities[1], 1);
        } else if cities[0] == 1 {
            assert_eq!(cities[1], 0);
        }
    }
}

#[test]
fn test_select_by_draw_walks_in_order() {
    let c = candidates(&[1.0, 2.0, 3.0]);
    assert_eq!(select_by_draw(&c, 0.5), 0);
    assert_eq!(select_by_draw(&c, 1.5), 1);
    assert_eq!(select_by_draw(&c, 5.9), 2);
}

#[test]
fn test_select_by_draw_exact_zero_remainder_selects_current() {
    let c = candidates(&[1.0, 2.0, 3.0]);
    // Remainder hits exactly zero at the first candidate.
    assert_eq!(select_by_draw(&c, 1.0), 0);
    assert_eq!(select_by_draw(&c, 3.0), 1);
    assert_eq!(select_by_draw(&c, 0.0), 0);
}

#[test]
fn test_select_by_draw_equal_scores_break_by_order() {
    let c = candidates(&[0.5, 0.5, 0.5, 0.5]);
    assert_eq!(select_by_draw(&c, 0.5), 0);
    assert_eq!(select_by_draw(&c, 0.75), 1);
    assert_eq!(select_by_draw(&c, 1.0), 1);
}

#[test]
fn test_select_by_draw_falls_back_to_first() {
    let c = candidates(&[1.0, 1.0]);
    assert_eq!(select_by_draw(&c, 2.5), 0);
    assert_eq!(select_by_draw(&c, f64::NAN), 0);
}

#[test]
fn test_roulette_prefers_infinite_score() {
    let c = vec![
        Candidate { city: 4, score: 1.0 },
        Candidate {
            city: 7,
            score: f64::INFINITY,
        },
    ];
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(roulette_select(&c, f64::INFINITY, &mut rng), 7);
}

#[test]
fn test_roulette_frequencies_follow_scores() {
    let c = candidates(&[1.0, 3.0]);
    let mut rng = StdRng::seed_from_u64(2024);
    let draws = 20_000;
    let picks_second = (0..draws)
        .filter(|_| roulette_select(&c, 4.0, &mut rng) == 1)
        .count();
    let ratio = picks_second as f64 / draws as f64;
    assert!((ratio - 0.75).abs() < 0.02, "ratio {}", ratio);
}
