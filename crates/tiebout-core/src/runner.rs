//! Bounded simulation loop.
//!
//! [`run_simulation`] drives [`TieboutModel::step`] until the model stops on
//! its own (the gap fell below the threshold) or a round limit is reached.
//! A [`RoundCallback`] sees every executed round, which is how collectors
//! build a history without the model retaining one.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use tiebout_types::{EndReason, RoundSummary};

use crate::model::TieboutModel;

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// The last round summary, if any round executed.
    pub final_summary: Option<RoundSummary>,
    /// Rounds executed by this call.
    pub total_rounds: u64,
}

/// Callback invoked after each executed round.
pub trait RoundCallback<R = StdRng> {
    /// Called with the round just executed and the model after it.
    fn on_round(&mut self, summary: &RoundSummary, model: &TieboutModel<R>);
}

/// A callback that ignores every round.
pub struct NoOpCallback;

impl<R> RoundCallback<R> for NoOpCallback {
    fn on_round(&mut self, _summary: &RoundSummary, _model: &TieboutModel<R>) {}
}

/// Step the model until it stops or `max_steps` rounds have run.
///
/// A `max_steps` of 0 means no limit. Convergence is checked before the
/// limit, so a run whose last permitted round also converges reports
/// [`EndReason::Converged`]. A model that is already stopped returns at
/// once without executing a round.
pub fn run_simulation<R: Rng>(
    model: &mut TieboutModel<R>,
    max_steps: u64,
    callback: &mut dyn RoundCallback<R>,
) -> SimulationResult {
    let mut total_rounds: u64 = 0;

    info!(
        max_steps,
        min_gap_threshold = model.min_gap_threshold(),
        "Simulation starting"
    );

    loop {
        if !model.is_running() {
            return SimulationResult {
                end_reason: EndReason::Converged,
                final_summary: model.last_round().cloned(),
                total_rounds,
            };
        }

        if max_steps > 0 && total_rounds >= max_steps {
            info!(max_steps, round = model.round(), "Round limit reached");
            return SimulationResult {
                end_reason: EndReason::MaxStepsReached,
                final_summary: model.last_round().cloned(),
                total_rounds,
            };
        }

        model.step();
        total_rounds = total_rounds.saturating_add(1);

        if let Some(summary) = model.last_round() {
            callback.on_round(summary, model);
        }
    }
}

/// Log the outcome of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_rounds = result.total_rounds,
        final_round = result.final_summary.as_ref().map(|s| s.round),
        final_gap = result.final_summary.as_ref().map(|s| s.gap),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            round = summary.round,
            gap = summary.gap,
            residents_moved = summary.residents_moved,
            orphaned_residents = summary.orphaned_residents,
            "Final round summary"
        );
    } else {
        warn!("Simulation ended with no rounds executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::params::ModelParams;

    fn lone_resident(threshold: f64) -> TieboutModel {
        let params = ModelParams {
            num_residents: 1,
            num_cities: 1,
            height: 1,
            width: 1,
            initial_spending: vec![vec![0.0]],
            initial_preferences: vec![vec![10.0]],
            initial_positions: None,
            min_gap_threshold: threshold,
        };
        TieboutModel::new(params, StdRng::seed_from_u64(42)).unwrap()
    }

    struct CountingCallback {
        rounds: Vec<u64>,
    }

    impl RoundCallback for CountingCallback {
        fn on_round(&mut self, summary: &RoundSummary, model: &TieboutModel) {
            assert_eq!(summary.round, model.round());
            self.rounds.push(summary.round);
        }
    }

    #[test]
    fn stops_at_max_steps() {
        let mut model = lone_resident(-1.0);
        let mut callback = CountingCallback { rounds: Vec::new() };

        let result = run_simulation(&mut model, 4, &mut callback);
        assert_eq!(result.end_reason, EndReason::MaxStepsReached);
        assert_eq!(result.total_rounds, 4);
        assert_eq!(callback.rounds, vec![1, 2, 3, 4]);
        assert_eq!(result.final_summary.unwrap().round, 4);
    }

    #[test]
    fn stops_on_convergence() {
        // Round 1 gap is 10, round 2 gap is 0.
        let mut model = lone_resident(5.0);
        let result = run_simulation(&mut model, 0, &mut NoOpCallback);

        assert_eq!(result.end_reason, EndReason::Converged);
        assert_eq!(result.total_rounds, 2);
        assert_eq!(result.final_summary.unwrap().gap, 0.0);
        assert!(!model.is_running());
    }

    #[test]
    fn convergence_wins_over_limit_on_last_round() {
        let mut model = lone_resident(5.0);
        let result = run_simulation(&mut model, 2, &mut NoOpCallback);
        assert_eq!(result.end_reason, EndReason::Converged);
    }

    #[test]
    fn already_stopped_model_runs_nothing() {
        let mut model = lone_resident(5.0);
        let _ = run_simulation(&mut model, 0, &mut NoOpCallback);

        let mut callback = CountingCallback { rounds: Vec::new() };
        let result = run_simulation(&mut model, 10, &mut callback);
        assert_eq!(result.end_reason, EndReason::Converged);
        assert_eq!(result.total_rounds, 0);
        assert!(callback.rounds.is_empty());
    }
}
