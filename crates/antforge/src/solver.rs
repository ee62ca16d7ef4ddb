//! Entry points that hide engine wiring.

use antforge_config::ColonyConfig;
use antforge_core::{DistanceMatrix, Result};
use antforge_solver::{spawn_colony, AntColony, ColonyResult, ColonyTask};

/// Configuration file read by [`run_colony`] from the working directory.
pub const CONFIG_FILE: &str = "antforge.toml";

/// Runs a colony over `distances` using `antforge.toml`, or defaults when
/// the file is missing or unreadable.
pub fn run_colony(distances: &DistanceMatrix) -> Result<ColonyResult> {
    let config = ColonyConfig::load(CONFIG_FILE).unwrap_or_default();
    run_colony_with_config(distances, &config)
}

/// Runs a colony over `distances` with an explicit configuration.
pub fn run_colony_with_config(
    distances: &DistanceMatrix,
    config: &ColonyConfig,
) -> Result<ColonyResult> {
    init_console();
    AntColony::from_config(config, distances.dimension())?.solve(distances)
}

/// Starts a colony on a worker thread and streams its events.
///
/// Returns once the engine is configured; preconditions that depend on the
/// matrix are reported through [`ColonyTask::join`].
pub fn run_colony_streaming(
    distances: DistanceMatrix,
    config: &ColonyConfig,
) -> Result<ColonyTask> {
    init_console();
    let colony = AntColony::from_config(config, distances.dimension())?;
    Ok(spawn_colony(colony, distances))
}

fn init_console() {
    #[cfg(feature = "console")]
    antforge_console::init();
}
