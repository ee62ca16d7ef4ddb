//! Error types for AntForge

use thiserror::Error;

/// Main error type for AntForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AntForgeError {
    /// Run parameters violate a precondition (detected before any iteration)
    #[error("Invalid run parameters: {0}")]
    InvalidParameters(String),

    /// Distance matrix is not square or holds a negative or non-finite value
    #[error("Invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// Matrix dimension does not match the configured city count
    #[error("Dimension mismatch: expected {expected} cities, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Tour is not a closed Hamiltonian cycle over the cities
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// A run was started while another run is active on the same engine
    #[error("A colony run is already in progress")]
    AlreadyRunning,

    /// Invalid operation for the current engine state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for AntForge operations
pub type Result<T> = std::result::Result<T, AntForgeError>;
