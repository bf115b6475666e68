//! Construction parameters for a [`TieboutModel`] and their validation.
//!
//! Every configuration error is caught here, before the grid is built and
//! before any round runs.
//!
//! [`TieboutModel`]: crate::model::TieboutModel

use tiebout_types::Position;
use tiebout_world::WorldError;

/// Errors raised while validating [`ModelParams`] or building the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The grid could not be created or populated.
    #[error("world error: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },

    /// The city count does not match one city per cell.
    #[error("expected {cells} cities (one per cell), got {num_cities}")]
    CityCountMismatch {
        /// Requested city count.
        num_cities: u32,
        /// Number of grid cells.
        cells: u64,
    },

    /// A vector array does not have one entry per agent.
    #[error("{kind} array has {actual} entries, expected {expected}")]
    ArrayLengthMismatch {
        /// Which array was wrong.
        kind: VectorKind,
        /// Number of agents of that kind.
        expected: u64,
        /// Number of entries supplied.
        actual: u64,
    },

    /// Vectors have zero dimensions.
    #[error("{kind} vectors must have at least one dimension")]
    ZeroDimensions {
        /// The array whose vectors were empty.
        kind: VectorKind,
    },

    /// A vector's dimensionality differs from the rest of the run.
    #[error("{kind} vector {index} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        /// The array containing the vector.
        kind: VectorKind,
        /// Index of the vector in its array.
        index: usize,
        /// Dimensionality shared by the run.
        expected: usize,
        /// Dimensionality of this vector.
        actual: usize,
    },

    /// A vector entry is NaN or infinite.
    #[error("{kind} vector {index} contains a non-finite value")]
    NonFiniteValue {
        /// The array containing the vector.
        kind: VectorKind,
        /// Index of the vector in its array.
        index: usize,
    },

    /// The stopping threshold is NaN or infinite.
    #[error("min gap threshold must be finite, got {threshold}")]
    NonFiniteThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// An explicit resident position lies outside the grid.
    #[error("resident {index} position {position} is outside the {height}x{width} grid")]
    PositionOutOfBounds {
        /// Resident index.
        index: usize,
        /// The rejected position.
        position: Position,
        /// Grid rows.
        height: u32,
        /// Grid columns.
        width: u32,
    },
}

/// Identifies which per-agent array a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    /// City spending vectors.
    Spending,
    /// Resident preference vectors.
    Preference,
    /// Explicit resident positions.
    Position,
}

impl core::fmt::Display for VectorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spending => write!(f, "spending"),
            Self::Preference => write!(f, "preference"),
            Self::Position => write!(f, "position"),
        }
    }
}

/// Everything needed to construct a model.
///
/// Spending vectors are assigned to cities in cell traversal order and
/// preference vectors to residents by index. Without explicit positions,
/// residents are placed uniformly at random.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Number of residents to create.
    pub num_residents: u32,
    /// Number of cities; must equal `height * width`.
    pub num_cities: u32,
    /// Grid rows.
    pub height: u32,
    /// Grid columns.
    pub width: u32,
    /// One spending vector per city.
    pub initial_spending: Vec<Vec<f64>>,
    /// One preference vector per resident.
    pub initial_preferences: Vec<Vec<f64>>,
    /// Optional starting cell per resident.
    pub initial_positions: Option<Vec<Position>>,
    /// The model stops once a round's aggregate gap falls below this.
    pub min_gap_threshold: f64,
}

impl ModelParams {
    /// Check the parameters and return the shared dimensionality `k`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found. Checks run in this order:
    /// grid dimensions, city count, array lengths, dimensionality, finite
    /// values, threshold, positions.
    pub fn validate(&self) -> Result<usize, ModelError> {
        if self.height == 0 || self.width == 0 {
            return Err(WorldError::EmptyGrid {
                height: self.height,
                width: self.width,
            }
            .into());
        }

        let cells = u64::from(self.height)
            .checked_mul(u64::from(self.width))
            .ok_or(WorldError::GridTooLarge {
                height: self.height,
                width: self.width,
            })?;
        if u64::from(self.num_cities) != cells {
            return Err(ModelError::CityCountMismatch {
                num_cities: self.num_cities,
                cells,
            });
        }

        check_len(
            VectorKind::Spending,
            self.num_cities,
            self.initial_spending.len(),
        )?;
        check_len(
            VectorKind::Preference,
            self.num_residents,
            self.initial_preferences.len(),
        )?;
        if let Some(positions) = &self.initial_positions {
            check_len(VectorKind::Position, self.num_residents, positions.len())?;
        }

        // Every run has at least one city, so the first spending vector
        // fixes the dimensionality.
        let dimensions = self.initial_spending.first().map_or(0, Vec::len);
        if dimensions == 0 {
            return Err(ModelError::ZeroDimensions {
                kind: VectorKind::Spending,
            });
        }
        check_vectors(VectorKind::Spending, &self.initial_spending, dimensions)?;
        check_vectors(
            VectorKind::Preference,
            &self.initial_preferences,
            dimensions,
        )?;

        if !self.min_gap_threshold.is_finite() {
            return Err(ModelError::NonFiniteThreshold {
                threshold: self.min_gap_threshold,
            });
        }

        if let Some(positions) = &self.initial_positions {
            for (index, position) in positions.iter().enumerate() {
                if position.x >= self.width || position.y >= self.height {
                    return Err(ModelError::PositionOutOfBounds {
                        index,
                        position: *position,
                        height: self.height,
                        width: self.width,
                    });
                }
            }
        }

        Ok(dimensions)
    }
}

fn check_len(kind: VectorKind, expected: u32, actual: usize) -> Result<(), ModelError> {
    let actual = u64::try_from(actual).unwrap_or(u64::MAX);
    if actual != u64::from(expected) {
        return Err(ModelError::ArrayLengthMismatch {
            kind,
            expected: u64::from(expected),
            actual,
        });
    }
    Ok(())
}

fn check_vectors(
    kind: VectorKind,
    vectors: &[Vec<f64>],
    expected: usize,
) -> Result<(), ModelError> {
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != expected {
            return Err(ModelError::DimensionMismatch {
                kind,
                index,
                expected,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteValue { kind, index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ModelParams {
        ModelParams {
            num_residents: 2,
            num_cities: 4,
            height: 2,
            width: 2,
            initial_spending: vec![vec![1.0, 2.0]; 4],
            initial_preferences: vec![vec![3.0, 4.0]; 2],
            initial_positions: None,
            min_gap_threshold: 5.0,
        }
    }

    #[test]
    fn valid_params_report_dimensions() {
        assert_eq!(base().validate(), Ok(2));
    }

    #[test]
    fn zero_height_rejected() {
        let params = ModelParams {
            height: 0,
            num_cities: 0,
            ..base()
        };
        assert_eq!(
            params.validate(),
            Err(ModelError::World {
                source: WorldError::EmptyGrid {
                    height: 0,
                    width: 2
                }
            })
        );
    }

    #[test]
    fn city_count_must_cover_grid() {
        let params = ModelParams {
            num_cities: 3,
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::CityCountMismatch {
                num_cities: 3,
                cells: 4
            })
        ));
    }

    #[test]
    fn preference_array_length_checked() {
        let params = ModelParams {
            num_residents: 3,
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::ArrayLengthMismatch {
                kind: VectorKind::Preference,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn empty_vectors_rejected() {
        let params = ModelParams {
            initial_spending: vec![Vec::new(); 4],
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::ZeroDimensions { .. })
        ));
    }

    #[test]
    fn inconsistent_dimensions_rejected() {
        let mut params = base();
        if let Some(prefs) = params.initial_preferences.get_mut(1) {
            prefs.push(9.0);
        }
        assert!(matches!(
            params.validate(),
            Err(ModelError::DimensionMismatch {
                kind: VectorKind::Preference,
                index: 1,
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn non_finite_entries_rejected() {
        let mut params = base();
        if let Some(value) = params
            .initial_spending
            .get_mut(2)
            .and_then(|spending| spending.first_mut())
        {
            *value = f64::NAN;
        }
        assert!(matches!(
            params.validate(),
            Err(ModelError::NonFiniteValue {
                kind: VectorKind::Spending,
                index: 2
            })
        ));

        let params = ModelParams {
            min_gap_threshold: f64::INFINITY,
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::NonFiniteThreshold { .. })
        ));
    }

    #[test]
    fn explicit_positions_checked() {
        let params = ModelParams {
            initial_positions: Some(vec![Position::new(0, 0)]),
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::ArrayLengthMismatch {
                kind: VectorKind::Position,
                ..
            })
        ));

        let params = ModelParams {
            initial_positions: Some(vec![Position::new(0, 0), Position::new(2, 0)]),
            ..base()
        };
        assert!(matches!(
            params.validate(),
            Err(ModelError::PositionOutOfBounds { index: 1, .. })
        ));
    }
}
