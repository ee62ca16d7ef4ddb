//! Event system for colony monitoring.
//!
//! Listeners registered on a [`ColonyEventSupport`] are notified, in
//! registration order and on the solving thread, of:
//!
//! - **Run started**: once, before the first iteration
//! - **Improvement**: every time a strictly shorter tour is found
//! - **Progress**: once per completed iteration
//! - **Run completed**: once, carrying the final [`ColonyResult`]
//!
//! Within one iteration improvements are delivered before that
//! iteration's progress event.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use antforge_solver::event::{ColonyEventListener, ColonyEventSupport, ImprovementEvent};
//! use antforge_solver::BestSolution;
//!
//! #[derive(Debug)]
//! struct PrintBest;
//!
//! impl ColonyEventListener for PrintBest {
//!     fn on_improvement(&self, event: &ImprovementEvent, _best: &BestSolution) {
//!         println!("iteration {}: {}", event.iteration_index, event.distance);
//!     }
//! }
//!
//! let mut support = ColonyEventSupport::new();
//! support.add_listener(Arc::new(PrintBest));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use antforge_core::RunParameters;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::result::{BestSolution, ColonyResult};

/// Emitted once per completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub iteration_index: usize,
    /// `(iteration_index + 1) / iteration_count`, in `(0, 1]`.
    pub fraction_complete: f64,
}

impl ProgressEvent {
    pub fn new(iteration_index: usize, iteration_count: usize) -> Self {
        Self {
            iteration_index,
            fraction_complete: (iteration_index + 1) as f64 / iteration_count as f64,
        }
    }

    /// Progress as a percentage.
    pub fn percent(&self) -> f64 {
        self.fraction_complete * 100.0
    }
}

/// Emitted for every tour strictly shorter than the previous best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImprovementEvent {
    pub iteration_index: usize,
    pub distance: f64,
}

/// Owned form of every colony event, for channels and recordings.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Started(RunParameters),
    Improvement {
        event: ImprovementEvent,
        best: BestSolution,
    },
    Progress(ProgressEvent),
    Completed(ColonyResult),
}

impl RunEvent {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunEvent::Completed(_))
    }
}

/// Listener for colony run events.
///
/// Only [`ColonyEventListener::on_improvement`] is required; the other
/// callbacks default to no-ops.
pub trait ColonyEventListener: Send + Sync + Debug {
    /// Called before the first iteration.
    fn on_run_started(&self, _params: &RunParameters) {}

    /// Called when a strictly shorter tour is found.
    fn on_improvement(&self, event: &ImprovementEvent, best: &BestSolution);

    /// Called after every completed iteration.
    fn on_progress(&self, _event: &ProgressEvent) {}

    /// Called once when the run ends, cancelled or not.
    fn on_run_completed(&self, _result: &ColonyResult) {}
}

/// Central event broadcaster for colony events.
///
/// All listener methods are called synchronously in registration order.
pub struct ColonyEventSupport {
    listeners: Vec<Arc<dyn ColonyEventListener>>,
}

impl ColonyEventSupport {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ColonyEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn fire_run_started(&self, params: &RunParameters) {
        for listener in &self.listeners {
            listener.on_run_started(params);
        }
    }

    pub fn fire_improvement(&self, event: &ImprovementEvent, best: &BestSolution) {
        for listener in &self.listeners {
            listener.on_improvement(event, best);
        }
    }

    pub fn fire_progress(&self, event: &ProgressEvent) {
        for listener in &self.listeners {
            listener.on_progress(event);
        }
    }

    pub fn fire_run_completed(&self, result: &ColonyResult) {
        for listener in &self.listeners {
            listener.on_run_completed(result);
        }
    }
}

impl Default for ColonyEventSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ColonyEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColonyEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ColonyEventListener for LoggingEventListener {
    fn on_run_started(&self, params: &RunParameters) {
        info!(
            "{}[Event] Run started: {} cities, {} ants, {} iterations",
            self.prefix, params.city_count, params.ant_count, params.iteration_count
        );
    }

    fn on_improvement(&self, event: &ImprovementEvent, best: &BestSolution) {
        info!(
            "{}[Event] New best {} in iteration {}: {}",
            self.prefix, event.distance, event.iteration_index, best.tour
        );
    }

    fn on_progress(&self, event: &ProgressEvent) {
        debug!(
            "{}[Event] Iteration {} done ({:.1}%)",
            self.prefix,
            event.iteration_index,
            event.percent()
        );
    }

    fn on_run_completed(&self, result: &ColonyResult) {
        if result.terminated_early {
            info!(
                "{}[Event] Run ended (terminated early) with {}",
                self.prefix,
                result.best_distance()
            );
        } else {
            info!(
                "{}[Event] Run ended with {}",
                self.prefix,
                result.best_distance()
            );
        }
    }
}

/// Counts event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    started_count: AtomicUsize,
    improvement_count: AtomicUsize,
    progress_count: AtomicUsize,
    completed_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_count(&self) -> usize {
        self.started_count.load(Ordering::SeqCst)
    }

    pub fn improvement_count(&self) -> usize {
        self.improvement_count.load(Ordering::SeqCst)
    }

    pub fn progress_count(&self) -> usize {
        self.progress_count.load(Ordering::SeqCst)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.started_count.store(0, Ordering::SeqCst);
        self.improvement_count.store(0, Ordering::SeqCst);
        self.progress_count.store(0, Ordering::SeqCst);
        self.completed_count.store(0, Ordering::SeqCst);
    }
}

impl ColonyEventListener for CountingEventListener {
    fn on_run_started(&self, _params: &RunParameters) {
        self.started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_improvement(&self, _event: &ImprovementEvent, _best: &BestSolution) {
        self.improvement_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_progress(&self, _event: &ProgressEvent) {
        self.progress_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_run_completed(&self, _result: &ColonyResult) {
        self.completed_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct RecordingEventListener {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    pub fn events(&self) -> Vec<RunEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn improvements(&self) -> Vec<ImprovementEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Improvement { event, .. } => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<ProgressEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Progress(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ColonyEventListener for RecordingEventListener {
    fn on_run_started(&self, params: &RunParameters) {
        self.push(RunEvent::Started(*params));
    }

    fn on_improvement(&self, event: &ImprovementEvent, best: &BestSolution) {
        self.push(RunEvent::Improvement {
            event: *event,
            best: best.clone(),
        });
    }

    fn on_progress(&self, event: &ProgressEvent) {
        self.push(RunEvent::Progress(*event));
    }

    fn on_run_completed(&self, result: &ColonyResult) {
        self.push(RunEvent::Completed(result.clone()));
    }
}

/// Forwards events over an unbounded channel.
///
/// A closed receiver is not an error: events are dropped and the run
/// continues.
#[derive(Debug, Clone)]
pub struct ChannelEventListener {
    sender: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelEventListener {
    pub fn new(sender: mpsc::UnboundedSender<RunEvent>) -> Self {
        Self { sender }
    }
}

impl ColonyEventListener for ChannelEventListener {
    fn on_run_started(&self, params: &RunParameters) {
        let _ = self.sender.send(RunEvent::Started(*params));
    }

    fn on_improvement(&self, event: &ImprovementEvent, best: &BestSolution) {
        let _ = self.sender.send(RunEvent::Improvement {
            event: *event,
            best: best.clone(),
        });
    }

    fn on_progress(&self, event: &ProgressEvent) {
        let _ = self.sender.send(RunEvent::Progress(*event));
    }

    fn on_run_completed(&self, result: &ColonyResult) {
        let _ = self.sender.send(RunEvent::Completed(result.clone()));
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
