//! Shared type definitions for the Tiebout sorting simulation.
//!
//! This crate is the single source of truth for the types exchanged between
//! the grid, the agent policies, the controller, and external collectors.
//!
//! # Modules
//!
//! - [`ids`] -- Dense agent indices and the run identifier
//! - [`enums`] -- Cell occupants, controller state, run end reasons
//! - [`structs`] -- Positions, agents, and per-round records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EndReason, Occupant, RunState};
pub use ids::{CityId, ResidentId, RunId};
pub use structs::{City, Position, Relocation, Resident, RoundSummary};
