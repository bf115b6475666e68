//! Run report written at the end of a simulation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tiebout_core::{HistoryCollector, SimulationResult};
use tiebout_types::{EndReason, RunId};

use crate::error::EngineError;

/// Everything recorded about one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Identifier of this run.
    pub run_id: RunId,
    /// Configured run name.
    pub name: String,
    /// Seed the run was started from.
    pub seed: u64,
    /// When the model was built.
    pub started_at: DateTime<Utc>,
    /// When the run loop returned.
    pub finished_at: DateTime<Utc>,
    /// Why the run ended.
    pub end_reason: EndReason,
    /// Rounds executed.
    pub total_rounds: u64,
    /// Aggregate gap of the last round, if any ran.
    pub final_gap: Option<f64>,
    /// Per-round gaps and spending snapshots.
    pub history: HistoryCollector,
    /// Spending matrix with the initial levels as row 0.
    pub spending_matrix: Vec<Vec<Vec<f64>>>,
}

impl RunReport {
    /// Assemble a report from the run outcome and its history.
    pub fn new(
        name: String,
        seed: u64,
        started_at: DateTime<Utc>,
        result: &SimulationResult,
        history: HistoryCollector,
    ) -> Self {
        Self {
            run_id: RunId::new(),
            name,
            seed,
            started_at,
            finished_at: Utc::now(),
            end_reason: result.end_reason,
            total_rounds: result.total_rounds,
            final_gap: result.final_summary.as_ref().map(|s| s.gap),
            spending_matrix: history.spending_matrix(),
            history,
        }
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialize`] or [`EngineError::Io`].
    pub fn write_json(&self, path: &std::path::Path) -> Result<(), EngineError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
