use serde::{Deserialize, Serialize};

/// A position in the plane, either geographic (lon/lat) or in projected units
/// depending on the spatial reference it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
