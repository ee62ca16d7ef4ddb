//! Handle for observing and cancelling a colony run from other threads.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of a colony engine.
///
/// `Idle → Running → Completed`. Completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunState {
    Idle = 0,
    Running = 1,
    Completed = 2,
}

impl RunState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => RunState::Idle,
            1 => RunState::Running,
            _ => RunState::Completed,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
        }
    }
}

/// Cloneable handle onto one engine's run.
///
/// # Example
///
/// ```
/// use antforge_core::RunParameters;
/// use antforge_solver::{AntColony, RunState};
///
/// let colony = AntColony::new(RunParameters::new(4, 10, 5)).unwrap();
/// let handle = colony.handle();
/// assert_eq!(handle.run_state(), RunState::Idle);
/// assert!(!handle.is_running());
///
/// // Takes effect at the next iteration boundary.
/// handle.terminate_early();
/// assert!(handle.is_terminate_early_requested());
/// ```
#[derive(Clone)]
pub struct ColonyHandle {
    state: Arc<AtomicU8>,
    terminate_early: Arc<AtomicBool>,
}

impl ColonyHandle {
    pub(crate) fn new(state: Arc<AtomicU8>, terminate_early: Arc<AtomicBool>) -> Self {
        Self {
            state,
            terminate_early,
        }
    }

    pub fn run_state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Returns true if the engine is currently solving.
    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.run_state() == RunState::Completed
    }

    /// Requests early termination.
    ///
    /// The run stops before its next iteration and still reports
    /// completion. Requesting before the run starts ends it before the
    /// first iteration.
    pub fn terminate_early(&self) {
        self.terminate_early.store(true, Ordering::SeqCst);
    }

    pub fn is_terminate_early_requested(&self) -> bool {
        self.terminate_early.load(Ordering::SeqCst)
    }
}

impl Debug for ColonyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColonyHandle")
            .field("state", &self.run_state())
            .field("terminate_early", &self.is_terminate_early_requested())
            .finish()
    }
}
