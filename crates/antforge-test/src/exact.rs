//! Exact optimum for small instances by enumerating permutations.

use antforge_core::{DistanceMatrix, Tour};

/// Returns the shortest tour and its length, fixing city 0 as the start.
///
/// Factorial time; intended for instances of at most ten cities.
pub fn brute_force_optimum(matrix: &DistanceMatrix) -> Option<(Tour, f64)> {
    let n = matrix.dimension();
    if n == 0 {
        return None;
    }
    let mut rest: Vec<usize> = (1..n).collect();
    let mut best: Option<(Vec<usize>, f64)> = None;
    permute(&mut rest, 0, &mut |order| {
        let mut path = Vec::with_capacity(n);
        path.push(0);
        path.extend_from_slice(order);
        let length = matrix.tour_length(&Tour::closing(path.clone()));
        if best.as_ref().map_or(true, |(_, b)| length < *b) {
            best = Some((path, length));
        }
    });
    best.map(|(path, length)| (Tour::closing(path), length))
}

fn permute(items: &mut [usize], k: usize, visit: &mut dyn FnMut(&[usize])) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute(items, k + 1, visit);
        items.swap(k, i);
    }
}
