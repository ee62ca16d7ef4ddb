//! AntForge - Ant Colony Optimization for the TSP in Rust
//!
//! Hand a distance matrix to [`run_colony`] and get back the shortest tour
//! the colony found. Settings come from `antforge.toml` when present.
//!
//! # Example
//!
//! ```rust
//! use antforge::prelude::*;
//!
//! let distances = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ]).unwrap();
//!
//! let config = ColonyConfig::new()
//!     .with_random_seed(42)
//!     .with_colony(ColonyParams { ant_count: 50, ..ColonyParams::default() });
//! let result = run_colony_with_config(&distances, &config).unwrap();
//!
//! let cities = City::labelled(4);
//! let best = result.best.unwrap();
//! assert_eq!(best.distance, 80.0);
//! println!("{}", best.tour.display_with(&cities));
//! ```

// Domain types
pub use antforge_core::{AntForgeError, City, DistanceMatrix, Result, RunParameters, Tour};

// Configuration
pub use antforge_config::{
    ColonyConfig, ColonyParams, ConfigError, ConstructionMode, DepositSchedule, EnvironmentMode,
};

// Engine, events and results
pub use antforge_solver::{
    AntColony, BestSolution, ChannelEventListener, ColonyEventListener, ColonyHandle,
    ColonyResult, ColonyStatistics, ColonyTask, CountingEventListener, ImprovementEvent,
    LoggingEventListener, ProgressEvent, RecordingEventListener, RunEvent, RunState,
};

/// Console output, initialized automatically by the entry points.
#[cfg(feature = "console")]
pub use antforge_console as console;

mod solver;
pub use solver::{run_colony, run_colony_streaming, run_colony_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{run_colony, run_colony_streaming, run_colony_with_config};
    pub use super::{AntColony, ColonyResult, RunEvent};
    pub use super::{City, DistanceMatrix, RunParameters, Tour};
    pub use super::{ColonyConfig, ColonyParams, DepositSchedule, EnvironmentMode};
}
