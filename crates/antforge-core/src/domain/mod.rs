//! Domain model for the traveling salesman problem.
//!
//! - [`City`]: stable index plus display label
//! - [`DistanceMatrix`]: square matrix of edge distances
//! - [`Tour`]: closed cycle of city indices
//! - [`RunParameters`]: colony settings for one run

mod city;
mod distance;
mod params;
mod tour;

pub use city::City;
pub use distance::DistanceMatrix;
pub use params::{
    RunParameters, DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_EVAPORATION_RATE, MIN_CITY_COUNT,
};
pub use tour::{Tour, TourDisplay};
