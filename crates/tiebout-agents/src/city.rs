//! City spending update policy.
//!
//! After every resident has moved, each city sets its spending level in
//! every dimension to the mean preference of the residents in its Moore
//! neighborhood (center included). A city with no neighboring residents
//! keeps its previous spending.

use tiebout_types::{City, Resident};
use tiebout_world::TorusGrid;

use crate::mismatch::mean;

/// Compute a city's next spending vector.
///
/// Returns `None` when no resident is in the neighborhood, in which case
/// the caller leaves the spending vector unchanged. Preferences are
/// snapshotted before averaging, so the result does not depend on the
/// order residents are visited in.
pub fn neighbor_mean_preferences(
    city: &City,
    grid: &TorusGrid,
    residents: &[Resident],
) -> Option<Vec<f64>> {
    let preferences: Vec<&[f64]> = grid
        .neighbor_residents(city.position, true)
        .into_iter()
        .filter_map(|id| residents.get(id.index()))
        .map(|resident| resident.preferences.as_slice())
        .collect();

    if preferences.is_empty() {
        return None;
    }

    (0..city.spending.len())
        .map(|dim| {
            let values = preferences.iter().filter_map(|p| p.get(dim).copied());
            mean(values)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use tiebout_types::{CityId, Occupant, Position, ResidentId};

    use super::*;

    fn make_city(grid: &mut TorusGrid, pos: Position, spending: Vec<f64>) -> City {
        let id = CityId::new(0);
        grid.place(Occupant::City(id), pos).unwrap();
        City {
            id,
            spending,
            position: pos,
        }
    }

    fn make_residents(grid: &mut TorusGrid, placements: &[(Position, Vec<f64>)]) -> Vec<Resident> {
        placements
            .iter()
            .enumerate()
            .map(|(i, (pos, prefs))| {
                let id = ResidentId::new(u32::try_from(i).unwrap());
                grid.place(Occupant::Resident(id), *pos).unwrap();
                Resident {
                    id,
                    preferences: prefs.clone(),
                    position: *pos,
                }
            })
            .collect()
    }

    #[test]
    fn no_neighbors_keeps_spending() {
        let mut grid = TorusGrid::new(5, 5).unwrap();
        let city = make_city(&mut grid, Position::new(0, 0), vec![3.0]);
        let residents = make_residents(&mut grid, &[(Position::new(2, 2), vec![9.0])]);

        assert_eq!(neighbor_mean_preferences(&city, &grid, &residents), None);
    }

    #[test]
    fn single_resident_sets_spending() {
        let mut grid = TorusGrid::new(1, 1).unwrap();
        let city = make_city(&mut grid, Position::new(0, 0), vec![0.0]);
        let residents = make_residents(&mut grid, &[(Position::new(0, 0), vec![10.0])]);

        assert_eq!(
            neighbor_mean_preferences(&city, &grid, &residents),
            Some(vec![10.0])
        );
    }

    #[test]
    fn averages_each_dimension_over_neighborhood() {
        let mut grid = TorusGrid::new(5, 5).unwrap();
        let city = make_city(&mut grid, Position::new(0, 0), vec![0.0, 0.0]);
        let residents = make_residents(
            &mut grid,
            &[
                (Position::new(0, 0), vec![2.0, 10.0]),
                (Position::new(4, 4), vec![4.0, 20.0]),
                (Position::new(1, 0), vec![6.0, 30.0]),
                // Outside the neighborhood.
                (Position::new(2, 2), vec![100.0, 100.0]),
            ],
        );

        assert_eq!(
            neighbor_mean_preferences(&city, &grid, &residents),
            Some(vec![4.0, 20.0])
        );
    }

    #[test]
    fn stacked_residents_each_count() {
        let mut grid = TorusGrid::new(3, 3).unwrap();
        let city = make_city(&mut grid, Position::new(1, 1), vec![0.0]);
        let residents = make_residents(
            &mut grid,
            &[
                (Position::new(1, 1), vec![1.0]),
                (Position::new(1, 1), vec![2.0]),
                (Position::new(0, 0), vec![6.0]),
            ],
        );

        assert_eq!(
            neighbor_mean_preferences(&city, &grid, &residents),
            Some(vec![3.0])
        );
    }
}
