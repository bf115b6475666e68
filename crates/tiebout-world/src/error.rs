//! Error types for the `tiebout-world` crate.
//!
//! All fallible grid operations return [`WorldError`].

use tiebout_types::{Position, ResidentId};

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A grid dimension was zero.
    #[error("grid dimensions must be non-zero (height {height}, width {width})")]
    EmptyGrid {
        /// Requested number of rows.
        height: u32,
        /// Requested number of columns.
        width: u32,
    },

    /// The grid has more cells than can be addressed.
    #[error("grid of {height}x{width} cells is too large")]
    GridTooLarge {
        /// Requested number of rows.
        height: u32,
        /// Requested number of columns.
        width: u32,
    },

    /// A position lies outside the grid.
    #[error("cell {position} is outside the {height}x{width} grid")]
    CellOutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid rows.
        height: u32,
        /// Grid columns.
        width: u32,
    },

    /// The resident is not present at the specified cell.
    #[error("resident {resident} is not at cell {position}")]
    ResidentNotAtCell {
        /// The resident.
        resident: ResidentId,
        /// The cell.
        position: Position,
    },

    /// A second city was placed on a cell that already has one.
    #[error("cell {position} already holds a city")]
    CellAlreadyHasCity {
        /// The cell.
        position: Position,
    },
}
