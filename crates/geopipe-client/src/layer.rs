//! Client-side layer and plot entities.
//!
//! A layer is not part of the operator graph: it is a materialized view
//! over a registered workflow id, carrying display metadata for the rest of
//! the application.

use serde::{Deserialize, Serialize};

use geopipe_core::error::{GeopipeError, Result};
use geopipe_core::models::{
    RasterResultDescriptor, SpatialReference, TypedResultDescriptor, VectorResultDescriptor,
};
use geopipe_workflow::workflow::WorkflowId;

use crate::symbology::Symbology;

/// Project-scoped identifier of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Project-scoped identifier of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotId(pub u32);

/// Output metadata of the workflow a layer materializes. Plot workflows
/// have no renderable shape and therefore no layer metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerMetadata {
    Raster(RasterResultDescriptor),
    Vector(VectorResultDescriptor),
}

impl LayerMetadata {
    pub fn spatial_reference(&self) -> &SpatialReference {
        match self {
            LayerMetadata::Raster(descriptor) => &descriptor.spatial_reference,
            LayerMetadata::Vector(descriptor) => &descriptor.spatial_reference,
        }
    }
}

impl TryFrom<TypedResultDescriptor> for LayerMetadata {
    type Error = GeopipeError;

    fn try_from(descriptor: TypedResultDescriptor) -> Result<Self> {
        match descriptor {
            TypedResultDescriptor::Raster(descriptor) => Ok(LayerMetadata::Raster(descriptor)),
            TypedResultDescriptor::Vector(descriptor) => Ok(LayerMetadata::Vector(descriptor)),
            TypedResultDescriptor::Plot(_) => Err(GeopipeError::NotRenderableAsLayer {
                kind: "plot".to_string(),
            }),
        }
    }
}

/// A renderable binding of a registered workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub workflow_id: WorkflowId,
    pub name: String,
    pub metadata: LayerMetadata,
    pub symbology: Symbology,
    pub is_visible: bool,
    pub is_legend_visible: bool,
}

impl Layer {
    pub fn spatial_reference(&self) -> &SpatialReference {
        self.metadata.spatial_reference()
    }
}

/// A plot binding; no symbology, the backend renders the chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub workflow_id: WorkflowId,
    pub name: String,
}
