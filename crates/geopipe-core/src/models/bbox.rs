//! Axis-aligned spatial bounds.
//!
//! `BoundingBox2D` is the lower-left/upper-right representation used for
//! vector extents and queries; `SpatialPartition2D` is the upper-left/
//! lower-right representation raster descriptors use. Both enforce their
//! corner ordering at construction.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate2D;
use crate::error::{GeopipeError, Result};

/// An axis-aligned rectangle with `xmin <= xmax` and `ymin <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxDict", into = "BoundingBoxDict")]
pub struct BoundingBox2D {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl BoundingBox2D {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        if xmin > xmax || ymin > ymax {
            return Err(GeopipeError::InvalidBoundingBox {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    pub fn from_coordinates(lower_left: Coordinate2D, upper_right: Coordinate2D) -> Result<Self> {
        Self::new(lower_left.x, lower_left.y, upper_right.x, upper_right.y)
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn lower_left(&self) -> Coordinate2D {
        Coordinate2D::new(self.xmin, self.ymin)
    }

    pub fn lower_right(&self) -> Coordinate2D {
        Coordinate2D::new(self.xmax, self.ymin)
    }

    pub fn upper_left(&self) -> Coordinate2D {
        Coordinate2D::new(self.xmin, self.ymax)
    }

    pub fn upper_right(&self) -> Coordinate2D {
        Coordinate2D::new(self.xmax, self.ymax)
    }

    pub fn contains_coordinate(&self, coordinate: Coordinate2D) -> bool {
        coordinate.x >= self.xmin
            && coordinate.x <= self.xmax
            && coordinate.y >= self.ymin
            && coordinate.y <= self.ymax
    }

    /// The smallest box covering `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Folds boxes into the one covering them all, `None` for an empty input.
    pub fn union_all<I: IntoIterator<Item = Self>>(boxes: I) -> Option<Self> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<Self>, b| match acc {
                Some(total) => Some(total.union(&b)),
                None => Some(b),
            })
    }
}

/// Wire shape: `{lowerLeftCoordinate, upperRightCoordinate}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundingBoxDict {
    lower_left_coordinate: Coordinate2D,
    upper_right_coordinate: Coordinate2D,
}

impl TryFrom<BoundingBoxDict> for BoundingBox2D {
    type Error = GeopipeError;

    fn try_from(dict: BoundingBoxDict) -> Result<Self> {
        Self::from_coordinates(dict.lower_left_coordinate, dict.upper_right_coordinate)
    }
}

impl From<BoundingBox2D> for BoundingBoxDict {
    fn from(bbox: BoundingBox2D) -> Self {
        Self {
            lower_left_coordinate: bbox.lower_left(),
            upper_right_coordinate: bbox.upper_right(),
        }
    }
}

/// A raster extent with `upperLeftCoordinate` left of and above
/// `lowerRightCoordinate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpatialPartitionDict", into = "SpatialPartitionDict")]
pub struct SpatialPartition2D {
    upper_left: Coordinate2D,
    lower_right: Coordinate2D,
}

impl SpatialPartition2D {
    pub fn new(upper_left: Coordinate2D, lower_right: Coordinate2D) -> Result<Self> {
        if upper_left.x > lower_right.x || upper_left.y < lower_right.y {
            return Err(GeopipeError::InvalidSpatialPartition {
                x1: upper_left.x,
                y1: upper_left.y,
                x2: lower_right.x,
                y2: lower_right.y,
            });
        }
        Ok(Self {
            upper_left,
            lower_right,
        })
    }

    pub fn upper_left(&self) -> Coordinate2D {
        self.upper_left
    }

    pub fn lower_right(&self) -> Coordinate2D {
        self.lower_right
    }

    pub fn as_bbox(&self) -> BoundingBox2D {
        BoundingBox2D {
            xmin: self.upper_left.x,
            ymin: self.lower_right.y,
            xmax: self.lower_right.x,
            ymax: self.upper_left.y,
        }
    }
}

impl From<BoundingBox2D> for SpatialPartition2D {
    fn from(bbox: BoundingBox2D) -> Self {
        Self {
            upper_left: bbox.upper_left(),
            lower_right: bbox.lower_right(),
        }
    }
}

/// Wire shape: `{upperLeftCoordinate, lowerRightCoordinate}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpatialPartitionDict {
    upper_left_coordinate: Coordinate2D,
    lower_right_coordinate: Coordinate2D,
}

impl TryFrom<SpatialPartitionDict> for SpatialPartition2D {
    type Error = GeopipeError;

    fn try_from(dict: SpatialPartitionDict) -> Result<Self> {
        Self::new(dict.upper_left_coordinate, dict.lower_right_coordinate)
    }
}

impl From<SpatialPartition2D> for SpatialPartitionDict {
    fn from(partition: SpatialPartition2D) -> Self {
        Self {
            upper_left_coordinate: partition.upper_left,
            lower_right_coordinate: partition.lower_right,
        }
    }
}

/// Pixel size of a raster in coordinate units per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialResolution {
    pub x: f64,
    pub y: f64,
}
