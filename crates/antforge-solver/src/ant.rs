//! Tour construction by a single ant.
//!
//! An ant starts at a uniformly random city and repeatedly moves to an
//! unvisited city chosen by roulette-wheel selection over
//! `pheromone^alpha * (1 / distance)^beta`, then returns to its start.

use antforge_core::{DistanceMatrix, Tour};
use rand::Rng;

use crate::pheromone::PheromoneMatrix;

/// An unvisited city and its desirability from the current city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub city: usize,
    pub score: f64,
}

/// Builds tours against a fixed view of distances and trails.
///
/// # Example
///
/// ```
/// use antforge_core::DistanceMatrix;
/// use antforge_solver::ant::Ant;
/// use antforge_solver::pheromone::PheromoneMatrix;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ]).unwrap();
/// let trails = PheromoneMatrix::new(3);
///
/// let ant = Ant::new(&distances, &trails, 1.0, 2.0);
/// let tour = ant.construct(&mut StdRng::seed_from_u64(7));
/// assert!(tour.is_valid(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ant<'a> {
    distances: &'a DistanceMatrix,
    trails: &'a PheromoneMatrix,
    alpha: f64,
    beta: f64,
}

impl<'a> Ant<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        trails: &'a PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            distances,
            trails,
            alpha,
            beta,
        }
    }

    /// Desirability of moving from `from` to `to`.
    ///
    /// A zero distance yields `+inf` whenever `beta > 0`.
    #[inline]
    pub fn desirability(&self, from: usize, to: usize) -> f64 {
        let pheromone = self.trails.get(from, to).powf(self.alpha);
        let heuristic = (1.0 / self.distances.get(from, to)).powf(self.beta);
        pheromone * heuristic
    }

    /// Constructs one closed tour over every city.
    ///
    /// The matrix must hold at least one city.
    pub fn construct<R: Rng + ?Sized>(&self, rng: &mut R) -> Tour {
        let n = self.distances.dimension();
        let start = rng.random_range(0..n);

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n + 1);
        let mut candidates = Vec::with_capacity(n);

        visited[start] = true;
        order.push(start);
        let mut current = start;

        while order.len() < n {
            candidates.clear();
            let mut total = 0.0;
            for next in 0..n {
                if !visited[next] {
                    let score = self.desirability(current, next);
                    candidates.push(Candidate { city: next, score });
                    total += score;
                }
            }

            let next = roulette_select(&candidates, total, rng);
            visited[next] = true;
            order.push(next);
            current = next;
        }

        Tour::closing(order)
    }
}

/// Picks a candidate with probability proportional to its score.
///
/// Draws `r` uniformly from `[0, total)` and hands it to [`select_by_draw`].
/// A candidate with an infinite score (a zero-distance hop) is taken
/// outright without consuming randomness.
///
/// `candidates` must not be empty.
pub fn roulette_select<R: Rng + ?Sized>(candidates: &[Candidate], total: f64, rng: &mut R) -> usize {
    if let Some(free) = candidates.iter().find(|c| c.score.is_infinite()) {
        return free.city;
    }
    let draw = rng.random::<f64>() * total;
    select_by_draw(candidates, draw)
}

/// Subtracts each score from `draw` in order and returns the first
/// candidate at which the remainder reaches or crosses zero.
///
/// Equal scores therefore resolve by candidate order. If rounding keeps
/// the remainder positive past the last candidate, the first candidate is
/// returned.
pub fn select_by_draw(candidates: &[Candidate], draw: f64) -> usize {
    let mut remainder = draw;
    for candidate in candidates {
        remainder -= candidate.score;
        if remainder <= 0.0 {
            return candidate.city;
        }
    }
    candidates[0].city
}

#[cfg(test)]
#[path = "ant_tests.rs"]
mod tests;
