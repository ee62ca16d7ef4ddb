//! Shared test fixtures for AntForge crates.
//!
//! This crate provides instances and pure helper functions for testing.
//! It depends only on `antforge-core` so every crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`instances`] - Fixed reference matrices with known optima
//! - [`random`] - Randomly generated symmetric instances
//! - [`exact`] - Brute force optimum for small instances
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! antforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use antforge_test::instances::{reference_matrix, REFERENCE_OPTIMUM};
//!
//! let matrix = reference_matrix();
//! assert_eq!(matrix.dimension(), 4);
//! assert_eq!(REFERENCE_OPTIMUM, 80.0);
//! ```

pub mod exact;
pub mod instances;
pub mod random;

pub use exact::brute_force_optimum;
pub use instances::{reference_matrix, triangle_matrix, REFERENCE_OPTIMUM};
pub use random::random_symmetric_matrix;
