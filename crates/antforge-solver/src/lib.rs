//! AntForge Solver Engine
//!
//! This crate provides the Ant Colony Optimization engine:
//! - Pheromone model (deposition, evaporation)
//! - Ant tour construction with roulette-wheel selection
//! - The [`AntColony`] run loop and its state machine
//! - Termination conditions
//! - Event system for monitoring
//! - Statistics, cancellation handle and channel runners

pub mod ant;
pub mod engine;
pub mod event;
pub mod handle;
pub mod pheromone;
pub mod result;
pub mod runner;
pub mod scope;
pub mod statistics;
pub mod termination;

pub use ant::Ant;
pub use engine::AntColony;
pub use event::{
    ChannelEventListener, ColonyEventListener, ColonyEventSupport, CountingEventListener,
    ImprovementEvent, LoggingEventListener, ProgressEvent, RecordingEventListener, RunEvent,
};
pub use handle::{ColonyHandle, RunState};
pub use pheromone::PheromoneMatrix;
pub use result::{BestSolution, ColonyResult};
pub use runner::{run_colony_with_channel, spawn_colony, ColonyTask};
pub use scope::{ColonyScope, IterationScope};
pub use statistics::{ColonyStatistics, DistanceImprovement, StatisticsCollector};
pub use termination::{
    ExternalTermination, IterationCountTermination, OrTermination, Termination,
};
