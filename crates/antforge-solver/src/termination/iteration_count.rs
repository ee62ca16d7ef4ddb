//! Iteration count termination.

use super::Termination;
use crate::scope::ColonyScope;

/// Terminates after a number of completed iterations.
///
/// # Example
///
/// ```
/// use antforge_solver::termination::IterationCountTermination;
///
/// let term = IterationCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct IterationCountTermination {
    limit: usize,
}

impl IterationCountTermination {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for IterationCountTermination {
    fn is_terminated(&self, colony_scope: &ColonyScope<'_>) -> bool {
        colony_scope.iterations_completed() >= self.limit
    }

    fn is_early(&self, _colony_scope: &ColonyScope<'_>) -> bool {
        false
    }
}
