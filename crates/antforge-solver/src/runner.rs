//! Channel-based entry points for streaming a run to another task.

use std::sync::Arc;
use std::thread::JoinHandle;

use antforge_core::{AntForgeError, DistanceMatrix, Result};
use tokio::sync::mpsc;

use crate::engine::AntColony;
use crate::event::{ChannelEventListener, RunEvent};
use crate::handle::ColonyHandle;
use crate::result::ColonyResult;

/// Solves on the calling thread, streaming every event through `sender`.
///
/// The channel receives `Started`, the improvement and progress events, and
/// finally `Completed`. A failed precondition sends nothing.
pub fn run_colony_with_channel(
    mut colony: AntColony,
    distances: &DistanceMatrix,
    sender: mpsc::UnboundedSender<RunEvent>,
) -> Result<ColonyResult> {
    colony.add_listener(Arc::new(ChannelEventListener::new(sender)));
    colony.solve(distances)
}

/// A run executing on its own worker thread.
#[derive(Debug)]
pub struct ColonyTask {
    pub handle: ColonyHandle,
    pub events: mpsc::UnboundedReceiver<RunEvent>,
    worker: JoinHandle<Result<ColonyResult>>,
}

impl ColonyTask {
    /// Waits for the worker thread and returns its result.
    pub fn join(self) -> Result<ColonyResult> {
        self.worker
            .join()
            .map_err(|_| AntForgeError::Internal("colony worker thread panicked".to_string()))?
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

/// Starts `colony` on a worker thread that owns `distances`.
///
/// # Example
///
/// ```
/// use antforge_core::{DistanceMatrix, RunParameters};
/// use antforge_solver::{spawn_colony, AntColony, RunEvent};
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ]).unwrap();
/// let colony = AntColony::new(RunParameters::new(3, 5, 2)).unwrap().with_seed(1);
///
/// let mut task = spawn_colony(colony, distances);
/// let mut progress = 0;
/// while let Some(event) = task.events.blocking_recv() {
///     if let RunEvent::Progress(_) = event {
///         progress += 1;
///     }
/// }
/// assert_eq!(progress, 5);
/// assert_eq!(task.join().unwrap().best_distance(), 12.0);
/// ```
pub fn spawn_colony(colony: AntColony, distances: DistanceMatrix) -> ColonyTask {
    let (sender, receiver) = mpsc::unbounded_channel();
    let handle = colony.handle();
    let worker =
        std::thread::spawn(move || run_colony_with_channel(colony, &distances, sender));

    ColonyTask {
        handle,
        events: receiver,
        worker,
    }
}
