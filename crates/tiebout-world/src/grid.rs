//! Toroidal grid: a fixed lattice of cells with wraparound on both axes.
//!
//! The [`TorusGrid`] is the spatial index of the simulation. It owns one
//! [`CellState`] per cell, answers Moore-neighborhood queries, and is the
//! single mutation point for agent positions.
//!
//! Cells are stored column-major: the cell at `(x, y)` lives at index
//! `x * height + y`. [`TorusGrid::coords`] walks cells in the same order,
//! which is the order cities are created in.

use std::collections::BTreeSet;

use tiebout_types::{CityId, Occupant, Position, ResidentId};
use tracing::trace;

use crate::cell::CellState;
use crate::error::WorldError;

/// Chebyshev radius of the Moore neighborhood.
const MOORE_RADIUS: i64 = 1;

/// A fixed-size 2-D lattice whose edges wrap around.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TorusGrid {
    /// Number of rows (`y` range).
    height: u32,
    /// Number of columns (`x` range).
    width: u32,
    /// Column-major cell storage.
    cells: Vec<CellState>,
}

impl TorusGrid {
    /// Create an empty grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] if either dimension is zero, or
    /// [`WorldError::GridTooLarge`] if the cell count overflows `usize`.
    pub fn new(height: u32, width: u32) -> Result<Self, WorldError> {
        if height == 0 || width == 0 {
            return Err(WorldError::EmptyGrid { height, width });
        }
        let too_large = || WorldError::GridTooLarge { height, width };
        let rows = usize::try_from(height).map_err(|_err| too_large())?;
        let cols = usize::try_from(width).map_err(|_err| too_large())?;
        let count = rows.checked_mul(cols).ok_or_else(too_large)?;

        Ok(Self {
            height,
            width,
            cells: vec![CellState::new(); count],
        })
    }

    /// Return the number of rows.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Return the number of columns.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Return the total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check whether a position lies on the grid.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Iterate over every cell coordinate, `x` outer and `y` inner.
    pub fn coords(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    /// Map signed coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        let wx = x.checked_rem_euclid(i64::from(self.width)).unwrap_or(0);
        let wy = y.checked_rem_euclid(i64::from(self.height)).unwrap_or(0);
        Position::new(
            u32::try_from(wx).unwrap_or(0),
            u32::try_from(wy).unwrap_or(0),
        )
    }

    /// Return the cells at Chebyshev distance at most 1 from `pos`.
    ///
    /// Each cell appears once even when wrapped offsets coincide (grids
    /// narrower than three cells along an axis). `pos` itself is part of
    /// the result only when `include_center` is set.
    pub fn neighborhood(&self, pos: Position, include_center: bool) -> Vec<Position> {
        let center = self.wrap(i64::from(pos.x), i64::from(pos.y));
        let mut seen = BTreeSet::new();
        let mut cells = Vec::with_capacity(9);

        for dx in -MOORE_RADIUS..=MOORE_RADIUS {
            for dy in -MOORE_RADIUS..=MOORE_RADIUS {
                let cell = self.wrap(
                    i64::from(center.x).saturating_add(dx),
                    i64::from(center.y).saturating_add(dy),
                );
                if cell == center && !include_center {
                    continue;
                }
                if seen.insert(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Return every occupant of the Moore neighborhood of `pos`.
    pub fn neighbors(&self, pos: Position, include_center: bool) -> Vec<Occupant> {
        self.neighborhood(pos, include_center)
            .into_iter()
            .filter_map(|cell| self.cell(cell))
            .flat_map(CellState::occupants)
            .collect()
    }

    /// Return the cities in the Moore neighborhood of `pos`.
    pub fn neighbor_cities(&self, pos: Position, include_center: bool) -> Vec<CityId> {
        self.neighbors(pos, include_center)
            .iter()
            .filter_map(Occupant::as_city)
            .collect()
    }

    /// Return the residents in the Moore neighborhood of `pos`.
    pub fn neighbor_residents(&self, pos: Position, include_center: bool) -> Vec<ResidentId> {
        self.neighbors(pos, include_center)
            .iter()
            .filter_map(Occupant::as_resident)
            .collect()
    }

    /// Get a cell's state.
    pub fn cell(&self, pos: Position) -> Option<&CellState> {
        self.index_of(pos).ok().and_then(|idx| self.cells.get(idx))
    }

    /// Return the city occupying a cell, if any.
    pub fn city_at(&self, pos: Position) -> Option<CityId> {
        self.cell(pos).and_then(CellState::city)
    }

    /// Return the residents on a cell.
    pub fn residents_at(&self, pos: Position) -> Vec<ResidentId> {
        self.cell(pos)
            .map(|cell| cell.residents().collect())
            .unwrap_or_default()
    }

    /// Return every occupant of a cell, empty for invalid positions.
    pub fn occupants_at(&self, pos: Position) -> Vec<Occupant> {
        self.cell(pos)
            .map(|cell| cell.occupants().collect())
            .unwrap_or_default()
    }

    /// Insert an occupant into a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] for invalid positions and
    /// [`WorldError::CellAlreadyHasCity`] when placing a second city.
    pub fn place(&mut self, occupant: Occupant, pos: Position) -> Result<(), WorldError> {
        let cell = self.cell_mut(pos)?;
        cell.add_occupant(occupant, pos)
    }

    /// Move a resident between cells.
    ///
    /// Moving to the same cell is a no-op. Both cells are validated before
    /// anything is modified, so a failed move leaves the grid untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] or
    /// [`WorldError::ResidentNotAtCell`] as appropriate.
    pub fn move_resident(
        &mut self,
        resident: ResidentId,
        from: Position,
        to: Position,
    ) -> Result<(), WorldError> {
        self.index_of(to)?;
        let source = self.cell(from).ok_or(WorldError::CellOutOfBounds {
            position: from,
            height: self.height,
            width: self.width,
        })?;
        if !source.contains(Occupant::Resident(resident)) {
            return Err(WorldError::ResidentNotAtCell {
                resident,
                position: from,
            });
        }
        if from == to {
            return Ok(());
        }

        self.cell_mut(from)?.remove_resident(resident, from)?;
        self.cell_mut(to)?
            .add_occupant(Occupant::Resident(resident), to)?;
        trace!(%resident, %from, %to, "Resident moved");
        Ok(())
    }

    /// Compute the storage index of a position.
    fn index_of(&self, pos: Position) -> Result<usize, WorldError> {
        let out_of_bounds = || WorldError::CellOutOfBounds {
            position: pos,
            height: self.height,
            width: self.width,
        };
        if !self.contains(pos) {
            return Err(out_of_bounds());
        }
        let x = usize::try_from(pos.x).map_err(|_err| out_of_bounds())?;
        let y = usize::try_from(pos.y).map_err(|_err| out_of_bounds())?;
        let rows = usize::try_from(self.height).map_err(|_err| out_of_bounds())?;
        x.checked_mul(rows)
            .and_then(|base| base.checked_add(y))
            .ok_or_else(out_of_bounds)
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut CellState, WorldError> {
        let idx = self.index_of(pos)?;
        let (height, width) = (self.height, self.width);
        self.cells.get_mut(idx).ok_or(WorldError::CellOutOfBounds {
            position: pos,
            height,
            width,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sorted(mut cells: Vec<Position>) -> Vec<Position> {
        cells.sort();
        cells
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            TorusGrid::new(0, 3),
            Err(WorldError::EmptyGrid {
                height: 0,
                width: 3
            })
        );
        assert!(TorusGrid::new(3, 0).is_err());
    }

    #[test]
    fn coords_walk_column_major() {
        let grid = TorusGrid::new(2, 3).unwrap();
        let coords: Vec<Position> = grid.coords().collect();
        assert_eq!(
            coords,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(2, 0),
                Position::new(2, 1),
            ]
        );
        assert_eq!(grid.cell_count(), 6);
    }

    #[test]
    fn wrap_handles_negative_and_overflowing_coordinates() {
        let grid = TorusGrid::new(4, 5).unwrap();
        assert_eq!(grid.wrap(-1, -1), Position::new(4, 3));
        assert_eq!(grid.wrap(5, 4), Position::new(0, 0));
        assert_eq!(grid.wrap(12, -9), Position::new(2, 3));
    }

    #[test]
    fn interior_neighborhood_has_nine_cells() {
        let grid = TorusGrid::new(5, 5).unwrap();
        let with_center = grid.neighborhood(Position::new(2, 2), true);
        let without_center = grid.neighborhood(Position::new(2, 2), false);
        assert_eq!(with_center.len(), 9);
        assert_eq!(without_center.len(), 8);
        assert!(with_center.contains(&Position::new(2, 2)));
        assert!(!without_center.contains(&Position::new(2, 2)));
    }

    #[test]
    fn corner_neighborhood_wraps() {
        let grid = TorusGrid::new(5, 5).unwrap();
        let cells = grid.neighborhood(Position::new(0, 0), false);
        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&Position::new(4, 4)));
        assert!(cells.contains(&Position::new(0, 4)));
        assert!(cells.contains(&Position::new(4, 0)));
        assert!(cells.contains(&Position::new(1, 1)));
    }

    #[test]
    fn tiny_grids_deduplicate_cells() {
        let single = TorusGrid::new(1, 1).unwrap();
        let origin = Position::new(0, 0);
        assert_eq!(single.neighborhood(origin, true), vec![origin]);
        assert!(single.neighborhood(Position::new(0, 0), false).is_empty());

        let pair = TorusGrid::new(1, 2).unwrap();
        assert_eq!(
            sorted(pair.neighborhood(Position::new(0, 0), true)),
            vec![Position::new(0, 0), Position::new(1, 0)]
        );
        assert_eq!(
            pair.neighborhood(Position::new(0, 0), false),
            vec![Position::new(1, 0)]
        );
    }

    #[test]
    fn neighbors_returns_all_occupants() {
        let mut grid = TorusGrid::new(3, 3).unwrap();
        for (i, pos) in grid.coords().collect::<Vec<_>>().into_iter().enumerate() {
            let id = u32::try_from(i).unwrap_or(0);
            assert!(grid.place(Occupant::City(CityId::new(id)), pos).is_ok());
        }
        let resident = Occupant::Resident(ResidentId::new(0));
        assert!(grid.place(resident, Position::new(1, 1)).is_ok());

        let occupants = grid.neighbors(Position::new(0, 0), true);
        assert_eq!(occupants.iter().filter(|o| o.is_city()).count(), 9);
        assert_eq!(occupants.iter().filter(|o| o.is_resident()).count(), 1);
        assert_eq!(grid.neighbor_cities(Position::new(0, 0), false).len(), 8);
        assert_eq!(
            grid.neighbor_residents(Position::new(2, 2), true),
            vec![ResidentId::new(0)]
        );
    }

    #[test]
    fn place_out_of_bounds_fails() {
        let mut grid = TorusGrid::new(2, 2).unwrap();
        let result = grid.place(Occupant::Resident(ResidentId::new(0)), Position::new(2, 0));
        assert!(matches!(result, Err(WorldError::CellOutOfBounds { .. })));
    }

    #[test]
    fn move_resident_between_cells() {
        let mut grid = TorusGrid::new(2, 2).unwrap();
        let resident = ResidentId::new(3);
        let from = Position::new(0, 0);
        let to = Position::new(1, 1);
        assert!(grid.place(Occupant::Resident(resident), from).is_ok());

        assert!(grid.move_resident(resident, from, to).is_ok());
        assert!(grid.residents_at(from).is_empty());
        assert_eq!(grid.residents_at(to), vec![resident]);
    }

    #[test]
    fn move_to_same_cell_is_noop() {
        let mut grid = TorusGrid::new(2, 2).unwrap();
        let resident = ResidentId::new(0);
        let pos = Position::new(1, 0);
        assert!(grid.place(Occupant::Resident(resident), pos).is_ok());
        let before = grid.clone();

        assert!(grid.move_resident(resident, pos, pos).is_ok());
        assert_eq!(grid, before);
    }

    #[test]
    fn move_absent_resident_leaves_grid_untouched() {
        let mut grid = TorusGrid::new(2, 2).unwrap();
        let before = grid.clone();
        let resident = ResidentId::new(1);
        let origin = Position::new(0, 0);
        let result = grid.move_resident(resident, origin, Position::new(1, 0));
        assert!(matches!(result, Err(WorldError::ResidentNotAtCell { .. })));
        assert_eq!(grid, before);

        let result = grid.move_resident(resident, origin, Position::new(9, 0));
        assert!(matches!(result, Err(WorldError::CellOutOfBounds { .. })));
    }

    #[test]
    fn city_lookup_by_cell() {
        let mut grid = TorusGrid::new(1, 2).unwrap();
        let city = Occupant::City(CityId::new(1));
        assert!(grid.place(city, Position::new(1, 0)).is_ok());
        assert_eq!(grid.city_at(Position::new(1, 0)), Some(CityId::new(1)));
        assert_eq!(grid.city_at(Position::new(0, 0)), None);
        assert_eq!(grid.city_at(Position::new(5, 5)), None);
    }

    #[test]
    fn occupants_at_lists_city_and_residents() {
        let mut grid = TorusGrid::new(2, 2).unwrap();
        let pos = Position::new(0, 1);
        grid.place(Occupant::City(CityId::new(1)), pos).unwrap();
        grid.place(Occupant::Resident(ResidentId::new(4)), pos).unwrap();

        assert_eq!(
            grid.occupants_at(pos),
            vec![
                Occupant::Resident(ResidentId::new(4)),
                Occupant::City(CityId::new(1)),
            ]
        );
        assert!(grid.occupants_at(Position::new(3, 3)).is_empty());
    }
}
