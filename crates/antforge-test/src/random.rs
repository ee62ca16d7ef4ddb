//! Randomly generated instances.
//!
//! Mirrors how interactive front-ends seed a fresh instance: integer
//! distances drawn uniformly from `1..=100`, written symmetrically.
//!
//! # Example
//!
//! ```
//! use antforge_test::random::random_symmetric_matrix;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let matrix = random_symmetric_matrix(6, &mut rng);
//! assert!(matrix.is_symmetric());
//! assert!(matrix.has_zero_diagonal());
//! ```

use antforge_core::DistanceMatrix;
use rand::Rng;

/// Largest generated distance.
pub const MAX_DISTANCE: u32 = 100;

/// Generates a symmetric, zero-diagonal matrix with integer distances in `1..=100`.
pub fn random_symmetric_matrix<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> DistanceMatrix {
    let mut matrix = DistanceMatrix::zeros(dimension);
    for i in 0..dimension {
        for j in i + 1..dimension {
            let distance = rng.random_range(1..=MAX_DISTANCE) as f64;
            matrix
                .set_symmetric(i, j, distance)
                .expect("indices are in range");
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_distances_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let matrix = random_symmetric_matrix(8, &mut rng);
        for i in 0..8 {
            for j in 0..8 {
                let d = matrix.get(i, j);
                if i == j {
                    assert_eq!(d, 0.0);
                } else {
                    assert!((1.0..=100.0).contains(&d));
                    assert_eq!(d.fract(), 0.0);
                }
            }
        }
    }
}
