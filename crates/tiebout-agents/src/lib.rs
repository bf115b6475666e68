//! Agent policies for the Tiebout simulation.
//!
//! This crate holds the decision logic that runs once per agent per round,
//! with no I/O and no ownership of world state. It sits between
//! `tiebout-world` (which answers spatial queries) and `tiebout-core`
//! (which owns the agents and applies the outcomes).
//!
//! # Modules
//!
//! - [`mismatch`] -- Mean absolute preference/spending difference
//! - [`resident`] -- Relocation policy with random tie-breaking
//!   ([`RelocationDecision`])
//! - [`city`] -- Spending update toward neighboring residents' mean
//!   preference

pub mod city;
pub mod mismatch;
pub mod resident;

// Re-export primary items at crate root for convenience.
pub use city::neighbor_mean_preferences;
pub use mismatch::{mean, mismatch};
pub use resident::{RelocationDecision, evaluate_relocation};
