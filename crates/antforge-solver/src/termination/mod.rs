//! Termination conditions for colony runs.
//!
//! Checked between iterations, never in the middle of one.

mod composite;
mod external;
mod iteration_count;

use std::fmt::Debug;

use crate::scope::ColonyScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use iteration_count::IterationCountTermination;

/// Trait for determining when to stop a run.
pub trait Termination: Send + Debug {
    /// Returns true if the run should stop before the next iteration.
    fn is_terminated(&self, colony_scope: &ColonyScope<'_>) -> bool;

    /// Returns true if stopping now means the run ended early.
    ///
    /// Reaching the configured iteration count is a normal end.
    fn is_early(&self, _colony_scope: &ColonyScope<'_>) -> bool {
        true
    }
}
