//! Fixed instances with known optimal tours.

use antforge_core::DistanceMatrix;

/// Optimal tour length of [`reference_matrix`].
pub const REFERENCE_OPTIMUM: f64 = 80.0;

/// Four cities whose optimal cycle is `0 → 1 → 3 → 2 → 0` (length 80).
///
/// The other two distinct cycles both have length 95.
pub fn reference_matrix() -> DistanceMatrix {
    from_rows(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
}

/// Three cities; every tour has length 12.
pub fn triangle_matrix() -> DistanceMatrix {
    from_rows(vec![
        vec![0.0, 3.0, 4.0],
        vec![3.0, 0.0, 5.0],
        vec![4.0, 5.0, 0.0],
    ])
}

/// Four cities where cities 0 and 1 coincide.
pub fn coincident_matrix() -> DistanceMatrix {
    from_rows(vec![
        vec![0.0, 0.0, 5.0, 7.0],
        vec![0.0, 0.0, 5.0, 7.0],
        vec![5.0, 5.0, 0.0, 4.0],
        vec![7.0, 7.0, 4.0, 0.0],
    ])
}

/// Every off-diagonal distance is zero.
pub fn zero_matrix(dimension: usize) -> DistanceMatrix {
    DistanceMatrix::zeros(dimension)
}

fn from_rows(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    DistanceMatrix::from_rows(rows).expect("fixture matrix is well-formed")
}
