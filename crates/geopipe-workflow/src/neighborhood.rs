//! Neighborhood definitions for focal raster operations.
//!
//! The backend requires odd, non-empty dimensions so that the neighborhood
//! has a center pixel. Violations are detected here, before a workflow is
//! ever submitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use geopipe_core::GeopipeError;

/// The neighborhood of a focal raster operation, either an explicit weights
/// matrix or an unweighted rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Neighborhood {
    WeightsMatrix { weights: Vec<Vec<f64>> },
    Rectangle { dimensions: [i32; 2] },
}

impl Neighborhood {
    pub fn weights_matrix(weights: Vec<Vec<f64>>) -> Self {
        Self::WeightsMatrix { weights }
    }

    pub fn rectangle(rows: i32, cols: i32) -> Self {
        Self::Rectangle {
            dimensions: [rows, cols],
        }
    }

    fn dimensions(&self) -> (i64, i64) {
        match self {
            Neighborhood::WeightsMatrix { weights } => {
                let rows = weights.len() as i64;
                let cols = weights.first().map_or(0, |row| row.len() as i64);
                (rows, cols)
            }
            Neighborhood::Rectangle { dimensions } => {
                (i64::from(dimensions[0]), i64::from(dimensions[1]))
            }
        }
    }

    /// Checks the center-pixel contract: both dimensions non-zero,
    /// non-negative, and odd; weight values finite.
    pub fn validate(&self) -> Result<(), NeighborhoodViolation> {
        let (rows, cols) = self.dimensions();

        if rows == 0 || cols == 0 {
            return Err(NeighborhoodViolation::EmptyDimensions);
        }

        if rows < 0 || cols < 0 {
            return Err(NeighborhoodViolation::DimensionsNegative);
        }

        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(NeighborhoodViolation::DimensionsNotOdd);
        }

        if let Neighborhood::WeightsMatrix { weights } = self {
            if weights.iter().flatten().any(|weight| !weight.is_finite()) {
                return Err(NeighborhoodViolation::NonFiniteWeights);
            }
        }

        Ok(())
    }
}

/// Why a [`Neighborhood`] is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NeighborhoodViolation {
    #[error("neighborhood dimensions must not be empty")]
    EmptyDimensions,
    #[error("neighborhood dimensions must be odd")]
    DimensionsNotOdd,
    #[error("neighborhood dimensions must not be negative")]
    DimensionsNegative,
    #[error("all neighborhood weights must be finite")]
    NonFiniteWeights,
}

impl From<NeighborhoodViolation> for GeopipeError {
    fn from(violation: NeighborhoodViolation) -> Self {
        GeopipeError::InvalidNeighborhood {
            reason: violation.to_string(),
        }
    }
}
