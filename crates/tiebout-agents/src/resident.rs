//! Resident relocation policy.
//!
//! Each round a resident compares the city it sits in (its city of record)
//! with every city in its Moore neighborhood, center included. It moves
//! only when some neighbor offers a strictly smaller mismatch, picking
//! uniformly at random among the cities tied at that minimum.
//!
//! Evaluation is pure: [`evaluate_relocation`] reads the grid and the city
//! table and returns a [`RelocationDecision`]. Applying the move is the
//! controller's job, so the grid is only ever mutated from the round loop.

use rand::Rng;
use tiebout_types::{City, CityId, Resident};
use tiebout_world::TorusGrid;

use crate::mismatch::mismatch;

/// Outcome of one resident's evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelocationDecision {
    /// Mismatch against the city of record. `None` means no city occupies
    /// the resident's cell, which ranks worse than any real gap.
    pub current_gap: Option<f64>,
    /// Smallest mismatch among neighboring cities, `None` if there are none.
    pub min_gap: Option<f64>,
    /// Number of neighboring cities tied at `min_gap` when a move is
    /// warranted, otherwise 0.
    pub candidates: usize,
    /// Chosen destination city, set only on strict improvement.
    pub destination: Option<CityId>,
    /// Mismatch against the destination, equal to `min_gap` when set.
    pub destination_gap: Option<f64>,
}

impl RelocationDecision {
    /// Whether the resident should move.
    pub const fn moves(&self) -> bool {
        self.destination.is_some()
    }
}

/// Decide whether and where a resident relocates this round.
///
/// `cities` is indexed by [`CityId`]. Cities named by the grid but missing
/// from the table are skipped. The random source is consumed only when a
/// strict improvement exists, to pick one of the tied candidates.
pub fn evaluate_relocation(
    resident: &Resident,
    grid: &TorusGrid,
    cities: &[City],
    rng: &mut impl Rng,
) -> RelocationDecision {
    let gaps: Vec<(CityId, f64)> = grid
        .neighbor_cities(resident.position, true)
        .into_iter()
        .filter_map(|id| cities.get(id.index()))
        .map(|city| (city.id, mismatch(&resident.preferences, &city.spending)))
        .collect();

    let current_gap = grid
        .city_at(resident.position)
        .and_then(|id| gaps.iter().find(|(city, _)| *city == id))
        .map(|(_, gap)| *gap);

    let min_gap = gaps
        .iter()
        .map(|(_, gap)| *gap)
        .min_by(f64::total_cmp);

    let mut decision = RelocationDecision {
        current_gap,
        min_gap,
        candidates: 0,
        destination: None,
        destination_gap: None,
    };

    let Some(best) = min_gap else {
        return decision;
    };
    if !is_strict_improvement(best, current_gap) {
        return decision;
    }

    let candidates: Vec<CityId> = gaps
        .iter()
        .filter(|(_, gap)| gap.total_cmp(&best).is_eq())
        .map(|(id, _)| *id)
        .collect();
    decision.candidates = candidates.len();

    if !candidates.is_empty() {
        let pick = rng.random_range(0..candidates.len());
        decision.destination = candidates.get(pick).copied();
        decision.destination_gap = decision.destination.map(|_| best);
    }
    decision
}

/// Ties never trigger a move; a missing city of record always loses.
fn is_strict_improvement(min_gap: f64, current_gap: Option<f64>) -> bool {
    current_gap.is_none_or(|current| min_gap.total_cmp(&current).is_lt())
}
