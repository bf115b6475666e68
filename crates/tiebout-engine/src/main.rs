//! Command-line runner for the Tiebout sorting simulation.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tiebout-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the random source from `world.seed`
//! 4. Generate initial preference and spending vectors
//! 5. Build the model and run it with a history collector
//! 6. Log the result and optionally write the run report

mod error;
mod report;
mod spawner;

use std::path::Path;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tiebout_core::{HistoryCollector, SimulationConfig, TieboutModel, runner};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::RunReport;

const CONFIG_PATH: &str = "tiebout-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, model construction, or report
/// output fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, from_file) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        height = config.world.height,
        width = config.world.width,
        max_steps = config.simulation.max_steps,
        min_gap = config.simulation.min_gap,
        from_file,
        "Configuration loaded"
    );

    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let params = spawner::build_params(&config, &mut rng)?;
    let mut model = TieboutModel::new(params, rng)?;

    let started_at = Utc::now();
    let mut history = HistoryCollector::new(&model);
    let result = runner::run_simulation(&mut model, config.simulation.max_steps, &mut history);
    runner::log_simulation_end(&result);

    if let Some(ref path) = config.output.history_path {
        let report = RunReport::new(
            config.world.name.clone(),
            config.world.seed,
            started_at,
            &result,
            history,
        );
        report.write_json(Path::new(path))?;
        info!(path = %path, run_id = %report.run_id, "Run report written");
    }

    Ok(())
}

/// Load configuration from `tiebout-config.yaml`.
///
/// If the file does not exist, defaults are used with environment
/// overrides applied. The flag reports whether the file was read.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}
