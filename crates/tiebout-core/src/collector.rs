//! Round-by-round history collection.
//!
//! The model keeps only its current state. [`HistoryCollector`] records the
//! aggregate gap and every city's spending after each round so a run can be
//! charted or exported afterwards.

use serde::{Deserialize, Serialize};

use tiebout_types::RoundSummary;

use crate::model::TieboutModel;
use crate::runner::RoundCallback;

/// State recorded after one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-based).
    pub round: u64,
    /// Aggregate gap of the round.
    pub gap: f64,
    /// Residents that relocated during the round.
    pub residents_moved: u32,
    /// Spending vector of every city after the city phase, by city id.
    pub spending_levels: Vec<Vec<f64>>,
}

/// Collects per-round gaps and spending snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryCollector {
    initial_spending: Vec<Vec<f64>>,
    rounds: Vec<RoundRecord>,
}

impl HistoryCollector {
    /// Start a history from the model's current spending levels.
    pub fn new<R>(model: &TieboutModel<R>) -> Self {
        Self {
            initial_spending: model.spending_levels(),
            rounds: Vec::new(),
        }
    }

    /// Recorded rounds, oldest first.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Aggregate gap per recorded round.
    pub fn gaps(&self) -> Vec<f64> {
        self.rounds.iter().map(|r| r.gap).collect()
    }

    /// Spending snapshots as a rounds-by-cities matrix.
    ///
    /// Row 0 holds the initial spending levels; row `n` holds the levels
    /// after round `n`.
    pub fn spending_matrix(&self) -> Vec<Vec<Vec<f64>>> {
        core::iter::once(self.initial_spending.clone())
            .chain(self.rounds.iter().map(|r| r.spending_levels.clone()))
            .collect()
    }

    /// Serialize the history as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<R> RoundCallback<R> for HistoryCollector {
    fn on_round(&mut self, summary: &RoundSummary, model: &TieboutModel<R>) {
        self.rounds.push(RoundRecord {
            round: summary.round,
            gap: summary.gap,
            residents_moved: summary.residents_moved,
            spending_levels: model.spending_levels(),
        });
    }
}
