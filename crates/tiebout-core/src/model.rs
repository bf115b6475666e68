//! The simulation controller.
//!
//! [`TieboutModel`] owns the grid, both agent tables, the aggregate gap and
//! the injected random source. Each call to [`TieboutModel::step`] runs one
//! round in two phases:
//!
//! 1. **Resident phase** -- every resident, in creation order, evaluates
//!    its neighborhood and relocates on strict improvement. Its pre-move
//!    gap is added to the aggregate. Moves are applied immediately, so
//!    later residents see earlier relocations.
//! 2. **City phase** -- every city, in creation order, sets its spending to
//!    the mean preference of the residents now in its neighborhood.
//!
//! The model stops once a round's aggregate falls below the threshold;
//! further steps are no-ops. A gap equal to the threshold keeps it running.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use tiebout_agents::{evaluate_relocation, neighbor_mean_preferences};
use tiebout_types::{
    City, CityId, Occupant, Position, Relocation, Resident, ResidentId, RoundSummary, RunState,
};
use tiebout_world::TorusGrid;

use crate::params::{ModelError, ModelParams};

/// Round-based Tiebout sorting model.
#[derive(Debug, Clone)]
pub struct TieboutModel<R = StdRng> {
    grid: TorusGrid,
    residents: Vec<Resident>,
    cities: Vec<City>,
    dimensions: usize,
    min_gap_threshold: f64,
    state: RunState,
    round: u64,
    gap: f64,
    last_round: Option<RoundSummary>,
    rng: R,
}

/// What the resident phase produced.
struct ResidentPhase {
    orphaned: u32,
    relocations: Vec<Relocation>,
}

impl<R: Rng> TieboutModel<R> {
    /// Build the grid and place every agent.
    ///
    /// Residents are created first, with ids `0..num_residents`. Without
    /// explicit positions each resident draws a column and then a row from
    /// `rng`. Cities follow, one per cell in traversal order, taking
    /// `initial_spending` entries in that same order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the parameters fail validation.
    pub fn new(params: ModelParams, mut rng: R) -> Result<Self, ModelError> {
        let dimensions = params.validate()?;
        let mut grid = TorusGrid::new(params.height, params.width)?;

        let mut positions = params.initial_positions.map(Vec::into_iter);
        let mut residents = Vec::with_capacity(params.initial_preferences.len());
        for (id, preferences) in (0..params.num_residents)
            .map(ResidentId::new)
            .zip(params.initial_preferences)
        {
            let position = positions
                .as_mut()
                .and_then(Iterator::next)
                .unwrap_or_else(|| {
                    let x = rng.random_range(0..params.width);
                    let y = rng.random_range(0..params.height);
                    Position::new(x, y)
                });
            grid.place(Occupant::Resident(id), position)?;
            residents.push(Resident {
                id,
                preferences,
                position,
            });
        }

        let coords: Vec<Position> = grid.coords().collect();
        let mut cities = Vec::with_capacity(coords.len());
        for ((id, position), spending) in (0..params.num_cities)
            .map(CityId::new)
            .zip(coords)
            .zip(params.initial_spending)
        {
            grid.place(Occupant::City(id), position)?;
            cities.push(City {
                id,
                spending,
                position,
            });
        }

        info!(
            height = params.height,
            width = params.width,
            residents = residents.len(),
            cities = cities.len(),
            dimensions,
            min_gap_threshold = params.min_gap_threshold,
            "Model initialized"
        );

        Ok(Self {
            grid,
            residents,
            cities,
            dimensions,
            min_gap_threshold: params.min_gap_threshold,
            state: RunState::Running,
            round: 0,
            gap: 0.0,
            last_round: None,
            rng,
        })
    }

    /// Run one round. Does nothing once the model has stopped.
    ///
    /// Residents without a city of record add nothing to the gap, so a
    /// round with any of them never stops the model.
    pub fn step(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }

        self.gap = 0.0;
        self.round = self.round.saturating_add(1);

        let phase = self.resident_phase();
        let cities_updated = self.city_phase();

        let residents_moved = u32::try_from(phase.relocations.len()).unwrap_or(u32::MAX);
        debug!(
            round = self.round,
            gap = self.gap,
            residents_moved,
            cities_updated,
            orphaned = phase.orphaned,
            "Round complete"
        );

        if phase.orphaned > 0 {
            warn!(
                round = self.round,
                orphaned = phase.orphaned,
                "Gap incomplete, convergence check skipped"
            );
        } else if self.gap < self.min_gap_threshold {
            self.state = RunState::Stopped;
            info!(
                round = self.round,
                gap = self.gap,
                min_gap_threshold = self.min_gap_threshold,
                "Gap below threshold, model stopped"
            );
        }

        self.last_round = Some(RoundSummary {
            round: self.round,
            gap: self.gap,
            residents_moved,
            orphaned_residents: phase.orphaned,
            relocations: phase.relocations,
        });
    }

    fn resident_phase(&mut self) -> ResidentPhase {
        let mut orphaned: u32 = 0;
        let mut relocations = Vec::new();

        for idx in 0..self.residents.len() {
            let Some(resident) = self.residents.get(idx) else {
                continue;
            };
            let decision = evaluate_relocation(resident, &self.grid, &self.cities, &mut self.rng);
            let id = resident.id;
            let from = resident.position;

            if let Some(gap) = decision.current_gap {
                self.gap += gap;
            } else {
                orphaned = orphaned.saturating_add(1);
                warn!(
                    round = self.round,
                    resident = %id,
                    position = %from,
                    "Resident has no city of record"
                );
            }

            let (Some(destination), Some(new_gap)) =
                (decision.destination, decision.destination_gap)
            else {
                continue;
            };
            let Some(to) = self.cities.get(destination.index()).map(|c| c.position) else {
                continue;
            };

            if let Err(err) = self.grid.move_resident(id, from, to) {
                warn!(round = self.round, resident = %id, %err, "Relocation skipped");
                continue;
            }
            if let Some(resident) = self.residents.get_mut(idx) {
                resident.position = to;
            }
            relocations.push(Relocation {
                resident: id,
                from,
                to,
                pre_move_gap: decision.current_gap,
                new_gap,
            });
        }

        ResidentPhase {
            orphaned,
            relocations,
        }
    }

    fn city_phase(&mut self) -> u32 {
        let mut updated: u32 = 0;
        for idx in 0..self.cities.len() {
            let next = self
                .cities
                .get(idx)
                .and_then(|city| neighbor_mean_preferences(city, &self.grid, &self.residents));
            if let (Some(spending), Some(city)) = (next, self.cities.get_mut(idx)) {
                city.spending = spending;
                updated = updated.saturating_add(1);
            }
        }
        updated
    }
}

impl<R> TieboutModel<R> {
    /// Whether further steps will run rounds.
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Current controller state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Number of rounds executed so far.
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Aggregate gap of the last executed round, 0 before the first.
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    /// Every city's spending vector, in city id order.
    pub fn spending_levels(&self) -> Vec<Vec<f64>> {
        self.cities.iter().map(|c| c.spending.clone()).collect()
    }

    /// All residents, indexed by [`ResidentId`].
    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    /// All cities, indexed by [`CityId`].
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The grid, for read-only inspection.
    pub const fn grid(&self) -> &TorusGrid {
        &self.grid
    }

    /// Summary of the last executed round.
    pub const fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// The stopping threshold.
    pub const fn min_gap_threshold(&self) -> f64 {
        self.min_gap_threshold
    }

    /// Shared dimensionality of preference and spending vectors.
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }
}
