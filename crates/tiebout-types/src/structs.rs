//! Core entity structs for the Tiebout simulation.
//!
//! Covers grid `Position`, the two agent kinds (`Resident`, `City`), and
//! the per-round records surfaced to data collectors and visualizers.

use serde::{Deserialize, Serialize};

use crate::ids::{CityId, ResidentId};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate on the torus.
///
/// `x` indexes columns in `[0, width)` and `y` indexes rows in
/// `[0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Position {
    /// Create a position from column and row indices.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// A mobile agent with a fixed preference vector.
///
/// Preferences are supplied at creation and never change. The position is
/// the cell whose city is the resident's city of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Stable identity for the lifetime of the run.
    pub id: ResidentId,
    /// Preferred spending level per dimension.
    pub preferences: Vec<f64>,
    /// Currently occupied cell.
    pub position: Position,
}

/// A stationary agent owning one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Stable identity for the lifetime of the run.
    pub id: CityId,
    /// Current spending level per dimension, rewritten every round.
    pub spending: Vec<f64>,
    /// The cell this city occupies. Never changes.
    pub position: Position,
}

// ---------------------------------------------------------------------------
// Round records
// ---------------------------------------------------------------------------

/// A single resident move executed during a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    /// The resident that moved.
    pub resident: ResidentId,
    /// Cell left behind.
    pub from: Position,
    /// Cell moved into.
    pub to: Position,
    /// Mismatch against the city of record before the move. `None` when the
    /// origin cell had no city.
    pub pre_move_gap: Option<f64>,
    /// Mismatch against the destination city at decision time.
    pub new_gap: f64,
}

/// Outcome of one executed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// The round number (1-based).
    pub round: u64,
    /// Sum of every resident's pre-move mismatch.
    pub gap: f64,
    /// Number of residents that changed cells.
    pub residents_moved: u32,
    /// Residents evaluated without a city of record; their gap is not
    /// part of the aggregate.
    pub orphaned_residents: u32,
    /// Moves in activation order.
    pub relocations: Vec<Relocation>,
}
