//! Distance model: a square matrix of edge lengths.

use crate::error::{AntForgeError, Result};

use super::Tour;

/// Square matrix of non-negative, finite distances stored row-major.
///
/// The reference instances are symmetric with a zero diagonal, but the
/// matrix does not enforce either: a tour only ever reads
/// `distance(from, to)` in the direction it travels.
///
/// # Example
///
/// ```
/// use antforge_core::{DistanceMatrix, Tour};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ]).unwrap();
///
/// let tour = Tour::closing(vec![0, 1, 2]);
/// assert_eq!(matrix.tour_length(&tour), 45.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct DistanceMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Creates an `n`×`n` matrix filled with zeros.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            values: vec![0.0; dimension * dimension],
        }
    }

    /// Builds a matrix from rows.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidMatrix`] if the rows are ragged or
    /// any entry is negative or non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dimension = rows.len();
        let mut values = Vec::with_capacity(dimension * dimension);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(AntForgeError::InvalidMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            for (j, value) in row.into_iter().enumerate() {
                check_distance(i, j, value)?;
                values.push(value);
            }
        }
        Ok(Self { dimension, values })
    }

    /// Copies the matrix back out as rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.dimension).map(|i| self.row(i).to_vec()).collect()
    }

    /// Number of cities.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.dimension == 0
    }

    /// Distance travelled from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.dimension + to]
    }

    /// Sets a single directed entry.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        check_distance(from, to, distance)?;
        self.values[from * self.dimension + to] = distance;
        Ok(())
    }

    /// Sets both `(a, b)` and `(b, a)`, keeping an edited matrix symmetric.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) -> Result<()> {
        self.set(a, b, distance)?;
        self.set(b, a, distance)
    }

    /// Returns row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.dimension;
        &self.values[start..start + self.dimension]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dimension)
            .all(|i| (i + 1..self.dimension).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.dimension).all(|i| self.get(i, i) == 0.0)
    }

    /// Sum of `distance(tour[k], tour[k + 1])` over consecutive cities.
    ///
    /// Callers pass well-formed tours of this matrix's dimension.
    pub fn tour_length(&self, tour: &Tour) -> f64 {
        tour.cities()
            .windows(2)
            .map(|edge| self.get(edge[0], edge[1]))
            .sum()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.dimension {
            Ok(())
        } else {
            Err(AntForgeError::InvalidMatrix(format!(
                "city index {} out of range for {} cities",
                index, self.dimension
            )))
        }
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = AntForgeError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.to_rows()
    }
}

fn check_distance(from: usize, to: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AntForgeError::InvalidMatrix(format!(
            "distance ({}, {}) must be finite and non-negative, got {}",
            from, to, value
        )))
    }
}
