//! Scope hierarchy for colony execution.
//!
//! Scopes hold state at two levels of a run:
//! - [`ColonyScope`]: the whole run; trails, RNG, best tour and history
//! - [`IterationScope`]: one iteration of `ant_count` tours

mod colony;
mod iteration;

pub use colony::ColonyScope;
pub use iteration::IterationScope;
