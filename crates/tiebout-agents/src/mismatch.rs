//! Preference/spending mismatch metric.
//!
//! `mismatch(r, c)` is the mean, over the k dimensions, of
//! `|preference_r[i] - spending_c[i]|`. It is the single comparability
//! measure used for relocation decisions and for the model-level gap.

/// Mean absolute per-dimension difference between a preference vector and
/// a spending vector.
///
/// Vectors are expected to share a length validated at model
/// construction. Extra trailing entries in the longer slice are ignored;
/// an empty input yields `0.0`.
pub fn mismatch(preferences: &[f64], spending: &[f64]) -> f64 {
    mean(
        preferences
            .iter()
            .zip(spending)
            .map(|(pref, spend)| (pref - spend).abs()),
    )
    .unwrap_or(0.0)
}

/// Arithmetic mean of a sequence, `None` when the sequence is empty.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut count: u32 = 0;
    let mut sum = 0.0;
    for value in values {
        sum += value;
        count = count.saturating_add(1);
    }
    (count > 0).then(|| sum / f64::from(count))
}
