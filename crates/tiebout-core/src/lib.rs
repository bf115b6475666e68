//! Simulation controller, round loop, and configuration for the Tiebout
//! sorting simulation.
//!
//! # Modules
//!
//! - [`params`] -- Construction parameters and their validation.
//! - [`model`] -- [`TieboutModel`], the two-phase round controller.
//! - [`runner`] -- Bounded run loop with per-round callbacks.
//! - [`collector`] -- [`HistoryCollector`] for gap and spending history.
//! - [`config`] -- Configuration loading from `tiebout-config.yaml`.
//!
//! [`TieboutModel`]: model::TieboutModel
//! [`HistoryCollector`]: collector::HistoryCollector

pub mod collector;
pub mod config;
pub mod model;
pub mod params;
pub mod runner;

pub use collector::{HistoryCollector, RoundRecord};
pub use config::{ConfigError, SimulationConfig};
pub use model::TieboutModel;
pub use params::{ModelError, ModelParams, VectorKind};
pub use runner::{
    NoOpCallback, RoundCallback, SimulationResult, log_simulation_end, run_simulation,
};
