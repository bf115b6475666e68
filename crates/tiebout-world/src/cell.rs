//! Per-cell occupant tracking.
//!
//! A [`CellState`] holds the set of agents currently sitting on one grid
//! cell: exactly one city once the model is initialized, plus any number
//! of residents. Occupants are kept in a [`BTreeSet`] so iteration order is
//! stable, which keeps seeded runs reproducible.

use std::collections::BTreeSet;

use tiebout_types::{CityId, Occupant, Position, ResidentId};

use crate::error::WorldError;

/// Mutable runtime state for a single grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellState {
    /// Agents currently present on this cell.
    occupants: BTreeSet<Occupant>,
}

impl CellState {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            occupants: BTreeSet::new(),
        }
    }

    /// Return the number of occupants, cities included.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Iterate over all occupants.
    pub fn occupants(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.occupants.iter().copied()
    }

    /// Return the city on this cell, if any.
    pub fn city(&self) -> Option<CityId> {
        self.occupants.iter().find_map(Occupant::as_city)
    }

    /// Iterate over the residents on this cell.
    pub fn residents(&self) -> impl Iterator<Item = ResidentId> + '_ {
        self.occupants.iter().filter_map(Occupant::as_resident)
    }

    /// Check whether a specific occupant is on this cell.
    pub fn contains(&self, occupant: Occupant) -> bool {
        self.occupants.contains(&occupant)
    }

    /// Add an occupant to this cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellAlreadyHasCity`] when adding a second city.
    pub fn add_occupant(
        &mut self,
        occupant: Occupant,
        position: Position,
    ) -> Result<(), WorldError> {
        if occupant.is_city() && self.city().is_some_and(|c| Some(c) != occupant.as_city()) {
            return Err(WorldError::CellAlreadyHasCity { position });
        }
        self.occupants.insert(occupant);
        Ok(())
    }

    /// Remove a resident from this cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ResidentNotAtCell`] if the resident is not here.
    pub fn remove_resident(
        &mut self,
        resident: ResidentId,
        position: Position,
    ) -> Result<(), WorldError> {
        if !self.occupants.remove(&Occupant::Resident(resident)) {
            return Err(WorldError::ResidentNotAtCell { resident, position });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_and_residents_share_a_cell() {
        let pos = Position::new(0, 0);
        let mut cell = CellState::new();
        for occupant in [
            Occupant::City(CityId::new(0)),
            Occupant::Resident(ResidentId::new(1)),
            Occupant::Resident(ResidentId::new(2)),
        ] {
            assert!(cell.add_occupant(occupant, pos).is_ok());
        }

        assert_eq!(cell.occupant_count(), 3);
        assert_eq!(cell.city(), Some(CityId::new(0)));
        assert_eq!(cell.residents().count(), 2);
    }

    #[test]
    fn second_city_rejected() {
        let pos = Position::new(1, 2);
        let mut cell = CellState::new();
        let first = Occupant::City(CityId::new(0));
        let second = Occupant::City(CityId::new(1));
        assert!(cell.add_occupant(first, pos).is_ok());
        assert_eq!(
            cell.add_occupant(second, pos),
            Err(WorldError::CellAlreadyHasCity { position: pos })
        );
    }

    #[test]
    fn removing_absent_resident_fails() {
        let pos = Position::new(0, 0);
        let mut cell = CellState::new();
        let result = cell.remove_resident(ResidentId::new(9), pos);
        assert!(matches!(result, Err(WorldError::ResidentNotAtCell { .. })));
    }
}
