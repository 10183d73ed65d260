//! Result descriptors: metadata describing what an operator produces
//! without executing it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::bbox::{BoundingBox2D, SpatialPartition2D, SpatialResolution};
use super::datatype::{RasterDataType, VectorColumnDataType, VectorDataType};
use super::measurement::Measurement;
use super::spatial_reference::SpatialReference;
use super::time::Time;

/// Tagged union over the three result families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypedResultDescriptor {
    Raster(RasterResultDescriptor),
    Vector(VectorResultDescriptor),
    Plot(PlotResultDescriptor),
}

impl TypedResultDescriptor {
    pub fn spatial_reference(&self) -> &SpatialReference {
        match self {
            TypedResultDescriptor::Raster(descriptor) => &descriptor.spatial_reference,
            TypedResultDescriptor::Vector(descriptor) => &descriptor.spatial_reference,
            TypedResultDescriptor::Plot(descriptor) => &descriptor.spatial_reference,
        }
    }

    pub fn time(&self) -> Option<Time> {
        match self {
            TypedResultDescriptor::Raster(descriptor) => descriptor.time,
            TypedResultDescriptor::Vector(descriptor) => descriptor.time,
            TypedResultDescriptor::Plot(_) => None,
        }
    }
}

/// A named raster band with its measurement semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterBandDescriptor {
    pub name: String,
    pub measurement: Measurement,
}

impl RasterBandDescriptor {
    pub fn new(name: impl Into<String>, measurement: Measurement) -> Self {
        Self {
            name: name.into(),
            measurement,
        }
    }

    pub fn unitless(name: impl Into<String>) -> Self {
        Self::new(name, Measurement::Unitless)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterResultDescriptor {
    pub spatial_reference: SpatialReference,
    pub data_type: RasterDataType,
    /// Ordered; band indices in operator parameters refer to this order.
    pub bands: Vec<RasterBandDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<SpatialPartition2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<SpatialResolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorColumnInfo {
    pub data_type: VectorColumnDataType,
    pub measurement: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorResultDescriptor {
    pub spatial_reference: SpatialReference,
    pub data_type: VectorDataType,
    pub columns: HashMap<String, VectorColumnInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox2D>,
}

impl VectorResultDescriptor {
    /// Names of the numeric columns, sorted for deterministic presentation.
    /// These are the columns plot and statistics operators may select.
    pub fn numeric_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self
            .columns
            .iter()
            .filter(|(_, info)| info.data_type.is_numeric())
            .map(|(name, _)| name.as_str())
            .collect();
        columns.sort_unstable();
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotResultDescriptor {
    pub spatial_reference: SpatialReference,
}
