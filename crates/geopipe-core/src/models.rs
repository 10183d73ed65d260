//! Core value types shared across all geopipe crates.

pub mod bbox;
pub mod coordinate;
pub mod datatype;
pub mod descriptor;
pub mod measurement;
pub mod spatial_reference;
pub mod time;

pub use bbox::{BoundingBox2D, SpatialPartition2D, SpatialResolution};
pub use coordinate::Coordinate2D;
pub use datatype::{RasterDataType, VectorColumnDataType, VectorDataType};
pub use descriptor::{
    PlotResultDescriptor, RasterBandDescriptor, RasterResultDescriptor, TypedResultDescriptor,
    VectorColumnInfo, VectorResultDescriptor,
};
pub use measurement::Measurement;
pub use spatial_reference::SpatialReference;
pub use time::{Time, TimeInterval, TimeStep, TimeStepGranularity, TimeType};
