//! Error types for geopipe

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GeopipeError {
    // Spatial value errors
    #[error("invalid bounding box: ({xmin}, {ymin}) must not exceed ({xmax}, {ymax})")]
    InvalidBoundingBox {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },

    #[error("invalid spatial partition: upper left ({x1}, {y1}) must be left of and above lower right ({x2}, {y2})")]
    InvalidSpatialPartition { x1: f64, y1: f64, x2: f64, y2: f64 },

    #[error("invalid spatial reference string: {srs}")]
    InvalidSpatialReference { srs: String },

    // Temporal errors
    #[error("time instant {millis} ms is outside the representable range")]
    TimeInstantOutOfRange { millis: i64 },

    #[error("time step shifts the interval outside the representable range")]
    TimeShiftOutOfRange,

    #[error("invalid time string: {input}")]
    InvalidTimeString { input: String },

    // Graph construction errors
    #[error("invalid neighborhood: {reason}")]
    InvalidNeighborhood { reason: String },

    #[error("a RasterVectorJoin needs one name per raster source, got {names} names for {rasters} rasters")]
    JoinNamesLengthMismatch { names: usize, rasters: usize },

    #[error("workflow declared as {declared} but its root operator produces {produced}")]
    WorkflowTypeMismatch {
        declared: String,
        produced: String,
    },

    // Layer errors
    #[error("a {kind} workflow cannot be materialized as a map layer")]
    NotRenderableAsLayer { kind: String },

    // Backend errors
    #[error("workflow not found: {id}")]
    WorkflowNotFound { id: Uuid },

    #[error("backend rejected the request ({error}): {message}")]
    Backend { error: String, message: String },

    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    // Configuration errors
    #[error("invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GeopipeError>;
