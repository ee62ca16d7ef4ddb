//! Colony statistics collection and reporting.
//!
//! This module provides types for tracking run performance during
//! solving: iteration and tour counts, skipped deposits, timing, and the
//! distance of every improvement.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Record of a best-distance improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceImprovement {
    /// Time since solving started when the improvement occurred.
    pub time_offset: Duration,
    /// Iteration in which the improving tour was built.
    pub iteration: usize,
    /// The new (shorter) best distance.
    pub distance: f64,
}

/// Complete statistics for a colony run.
#[derive(Debug, Clone, Default)]
pub struct ColonyStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Iterations completed.
    pub iteration_count: u64,
    /// Tours constructed across all ants and iterations.
    pub tours_constructed: u64,
    /// Tours whose deposit was skipped because their length was zero.
    pub skipped_deposits: u64,
    /// History of distance improvements.
    pub improvement_history: Vec<DistanceImprovement>,
}

impl ColonyStatistics {
    /// Returns the tour construction rate.
    pub fn tours_per_second(&self) -> u64 {
        let secs = self.total_duration.as_secs_f64();
        if secs > 0.0 {
            (self.tours_constructed as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns the best distance achieved (last in history, or None).
    pub fn best_distance(&self) -> Option<f64> {
        self.improvement_history.last().map(|i| i.distance)
    }

    /// Returns the number of improvements recorded.
    pub fn improvement_count(&self) -> usize {
        self.improvement_history.len()
    }

    /// Returns the average time per iteration.
    pub fn avg_time_per_iteration(&self) -> Duration {
        if self.iteration_count == 0 {
            Duration::ZERO
        } else {
            self.total_duration.div_f64(self.iteration_count as f64)
        }
    }
}

/// Thread-safe collector for colony statistics.
///
/// Record during solving, then call [`StatisticsCollector::into_statistics`]
/// or [`StatisticsCollector::snapshot`].
///
/// # Example
///
/// ```
/// use antforge_solver::statistics::StatisticsCollector;
///
/// let collector = StatisticsCollector::new();
/// collector.record_tour();
/// collector.record_tour();
/// collector.record_improvement(0, 95.0);
/// collector.record_iteration();
///
/// let stats = collector.into_statistics();
/// assert_eq!(stats.tours_constructed, 2);
/// assert_eq!(stats.iteration_count, 1);
/// assert_eq!(stats.best_distance(), Some(95.0));
/// ```
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    iteration_count: AtomicU64,
    tours_constructed: AtomicU64,
    skipped_deposits: AtomicU64,
    improvement_history: Mutex<Vec<DistanceImprovement>>,
}

impl StatisticsCollector {
    /// Creates a new statistics collector.
    ///
    /// The start time is recorded when this is called.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            iteration_count: AtomicU64::new(0),
            tours_constructed: AtomicU64::new(0),
            skipped_deposits: AtomicU64::new(0),
            improvement_history: Mutex::new(Vec::new()),
        }
    }

    /// Records a completed iteration.
    pub fn record_iteration(&self) {
        self.iteration_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one constructed tour.
    pub fn record_tour(&self) {
        self.tours_constructed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a deposit skipped for a zero-length tour.
    pub fn record_skipped_deposit(&self) {
        self.skipped_deposits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a new best distance.
    pub fn record_improvement(&self, iteration: usize, distance: f64) {
        let improvement = DistanceImprovement {
            time_offset: self.start_time.elapsed(),
            iteration,
            distance,
        };

        if let Ok(mut history) = self.improvement_history.lock() {
            history.push(improvement);
        }
    }

    /// Returns the elapsed time since the collector was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn current_iteration_count(&self) -> u64 {
        self.iteration_count.load(Ordering::Relaxed)
    }

    pub fn current_tours_constructed(&self) -> u64 {
        self.tours_constructed.load(Ordering::Relaxed)
    }

    /// Converts this collector into final statistics.
    pub fn into_statistics(self) -> ColonyStatistics {
        ColonyStatistics {
            total_duration: self.start_time.elapsed(),
            iteration_count: self.iteration_count.load(Ordering::Relaxed),
            tours_constructed: self.tours_constructed.load(Ordering::Relaxed),
            skipped_deposits: self.skipped_deposits.load(Ordering::Relaxed),
            improvement_history: self
                .improvement_history
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        }
    }

    /// Takes a snapshot of current statistics without consuming the collector.
    pub fn snapshot(&self) -> ColonyStatistics {
        let improvement_history = match self.improvement_history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        ColonyStatistics {
            total_duration: self.start_time.elapsed(),
            iteration_count: self.iteration_count.load(Ordering::Relaxed),
            tours_constructed: self.tours_constructed.load(Ordering::Relaxed),
            skipped_deposits: self.skipped_deposits.load(Ordering::Relaxed),
            improvement_history,
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}
