//! Enumeration types for the Tiebout simulation.

use serde::{Deserialize, Serialize};

use crate::ids::{CityId, ResidentId};

/// Something that occupies a grid cell.
///
/// Every cell holds exactly one city and zero or more residents. Callers
/// ask capability questions (`is_city`, `as_resident`) instead of matching
/// on concrete agent types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// A mobile resident.
    Resident(ResidentId),
    /// A stationary city.
    City(CityId),
}

impl Occupant {
    /// Whether this occupant is a city.
    pub const fn is_city(&self) -> bool {
        matches!(self, Self::City(_))
    }

    /// Whether this occupant is a resident.
    pub const fn is_resident(&self) -> bool {
        matches!(self, Self::Resident(_))
    }

    /// The city id, if this occupant is a city.
    pub const fn as_city(&self) -> Option<CityId> {
        match self {
            Self::City(id) => Some(*id),
            Self::Resident(_) => None,
        }
    }

    /// The resident id, if this occupant is a resident.
    pub const fn as_resident(&self) -> Option<ResidentId> {
        match self {
            Self::Resident(id) => Some(*id),
            Self::City(_) => None,
        }
    }
}

/// Lifecycle state of the simulation controller.
///
/// `Stopped` is terminal: once reached, further steps are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Rounds are still being executed.
    #[default]
    Running,
    /// The aggregate gap fell below the threshold.
    Stopped,
}

/// Reason a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The aggregate gap dropped below the configured threshold.
    Converged,
    /// The step budget was exhausted before convergence.
    MaxStepsReached,
}
