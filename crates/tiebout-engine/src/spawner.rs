//! Initial vector generation for a configured run.
//!
//! The model core never invents preferences or spending levels; the engine
//! draws them here from the population settings and hands them over as
//! [`ModelParams`]. Values are whole numbers drawn uniformly from
//! `value_min..=value_max`, preferences first, then spending.

use rand::Rng;
use tiebout_core::{ModelParams, SimulationConfig};
use tracing::info;

use crate::error::EngineError;

/// Draw `count` vectors of `dimensions` whole-number values.
pub fn random_vectors(
    rng: &mut impl Rng,
    count: u32,
    dimensions: u32,
    value_min: u32,
    value_max: u32,
) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| {
            (0..dimensions)
                .map(|_| f64::from(rng.random_range(value_min..=value_max)))
                .collect()
        })
        .collect()
}

/// Build model parameters for one city per cell and random vectors.
///
/// Resident positions are left to the model, which draws them from its own
/// random source.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the value range is empty or the
/// grid has more cells than fit in a `u32`.
pub fn build_params(
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<ModelParams, EngineError> {
    let population = &config.population;
    if population.value_min > population.value_max {
        return Err(EngineError::Spawner {
            message: format!(
                "value_min {} exceeds value_max {}",
                population.value_min, population.value_max
            ),
        });
    }

    let num_cities = config
        .world
        .height
        .checked_mul(config.world.width)
        .ok_or_else(|| EngineError::Spawner {
            message: format!(
                "grid of {}x{} cells is too large",
                config.world.height, config.world.width
            ),
        })?;

    let initial_preferences = random_vectors(
        rng,
        population.residents,
        population.dimensions,
        population.value_min,
        population.value_max,
    );
    let initial_spending = random_vectors(
        rng,
        num_cities,
        population.dimensions,
        population.value_min,
        population.value_max,
    );

    info!(
        residents = population.residents,
        cities = num_cities,
        dimensions = population.dimensions,
        value_min = population.value_min,
        value_max = population.value_max,
        "Initial vectors generated"
    );

    Ok(ModelParams {
        num_residents: population.residents,
        num_cities,
        height: config.world.height,
        width: config.world.width,
        initial_spending,
        initial_preferences,
        initial_positions: None,
        min_gap_threshold: config.simulation.min_gap,
    })
}
