//! AntForge Core - Core types for ant colony optimization
//!
//! This crate provides the fundamental data model for AntForge:
//! - [`City`] identifiers with display labels
//! - [`DistanceMatrix`], the read-only distance model, and tour length
//! - [`Tour`], a closed Hamiltonian cycle over the cities
//! - [`RunParameters`] with precondition validation

pub mod domain;
pub mod error;

pub use domain::{City, DistanceMatrix, RunParameters, Tour};
pub use error::{AntForgeError, Result};
