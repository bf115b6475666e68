//! Toroidal grid and cell occupancy for the Tiebout simulation.
//!
//! This crate models the physical layout: a fixed lattice of cells whose
//! edges wrap around, each cell holding one city and any number of
//! residents.
//!
//! # Modules
//!
//! - [`cell`] -- [`CellState`]: the occupant set of one cell.
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`TorusGrid`]: coordinate wrapping, Moore neighborhood
//!   queries, placement, and resident moves.
//!
//! [`CellState`]: cell::CellState
//! [`TorusGrid`]: grid::TorusGrid

pub mod cell;
pub mod error;
pub mod grid;

// Re-export primary types at crate root.
pub use cell::CellState;
pub use error::WorldError;
pub use grid::TorusGrid;
