//! Closed tours over a set of cities.

use std::fmt;

use crate::error::{AntForgeError, Result};

use super::City;

/// A Hamiltonian cycle: `n + 1` city indices, first and last equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Closes a visiting order by returning to its first city.
    ///
    /// The order is trusted to be a permutation of `0..n`; use
    /// [`Tour::from_path`] for untrusted input.
    ///
    /// # Example
    ///
    /// ```
    /// use antforge_core::Tour;
    ///
    /// let tour = Tour::closing(vec![2, 0, 1]);
    /// assert_eq!(tour.cities(), &[2, 0, 1, 2]);
    /// assert_eq!(tour.city_count(), 3);
    /// ```
    pub fn closing(mut order: Vec<usize>) -> Self {
        if let Some(&start) = order.first() {
            order.push(start);
        }
        Self { cities: order }
    }

    /// Validates a closed path over `city_count` cities.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidTour`] unless the path has length
    /// `city_count + 1`, starts and ends at the same city, and visits
    /// every city exactly once in between.
    pub fn from_path(path: Vec<usize>, city_count: usize) -> Result<Self> {
        let tour = Self { cities: path };
        tour.validate(city_count)?;
        Ok(tour)
    }

    /// Checks that this tour is a closed Hamiltonian cycle over `city_count` cities.
    pub fn validate(&self, city_count: usize) -> Result<()> {
        if self.cities.len() != city_count + 1 {
            return Err(AntForgeError::InvalidTour(format!(
                "expected {} entries, got {}",
                city_count + 1,
                self.cities.len()
            )));
        }
        if self.cities.first() != self.cities.last() {
            return Err(AntForgeError::InvalidTour(
                "tour does not return to its starting city".to_string(),
            ));
        }
        let mut seen = vec![false; city_count];
        for &city in &self.cities[..city_count] {
            if city >= city_count {
                return Err(AntForgeError::InvalidTour(format!(
                    "city {} out of range for {} cities",
                    city, city_count
                )));
            }
            if seen[city] {
                return Err(AntForgeError::InvalidTour(format!(
                    "city {} visited more than once",
                    city
                )));
            }
            seen[city] = true;
        }
        Ok(())
    }

    pub fn is_valid(&self, city_count: usize) -> bool {
        self.validate(city_count).is_ok()
    }

    /// All entries including the closing return to the start.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Number of distinct cities visited.
    pub fn city_count(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<usize> {
        self.cities.first().copied()
    }

    /// Consecutive `(from, to)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cities.windows(2).map(|edge| (edge[0], edge[1]))
    }

    /// Renders the tour using city labels, e.g. `A → B → D → C → A`.
    pub fn display_with<'a>(&'a self, cities: &'a [City]) -> TourDisplay<'a> {
        TourDisplay { tour: self, cities }
    }
}

/// Accepts a closed path over `path.len() - 1` cities.
impl TryFrom<Vec<usize>> for Tour {
    type Error = AntForgeError;

    fn try_from(path: Vec<usize>) -> Result<Self> {
        if path.is_empty() {
            return Err(AntForgeError::InvalidTour("tour is empty".to_string()));
        }
        let city_count = path.len() - 1;
        Self::from_path(path, city_count)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.cities
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, city) in self.cities.iter().enumerate() {
            if k > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{}", city)?;
        }
        Ok(())
    }
}

/// Labelled rendering of a [`Tour`].
#[derive(Debug)]
pub struct TourDisplay<'a> {
    tour: &'a Tour,
    cities: &'a [City],
}

impl fmt::Display for TourDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, &index) in self.tour.cities.iter().enumerate() {
            if k > 0 {
                f.write_str(" → ")?;
            }
            match self.cities.get(index) {
                Some(city) => write!(f, "{}", city)?,
                None => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}
