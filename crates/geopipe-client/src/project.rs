//! The active project: the client-side list of materialized layers and
//! plots.
//!
//! Layer and plot ids are allocated from counters scoped to the project
//! instance, so ids are stable within a project and independent across
//! projects and processes.

use geopipe_core::error::Result;
use geopipe_core::models::{SpatialReference, Time};
use geopipe_workflow::workflow::WorkflowId;

use crate::layer::{Layer, LayerId, LayerMetadata, Plot, PlotId};
use crate::ports::WorkflowRegistry;
use crate::symbology::Symbology;

/// Mutable client-side project state. All mutation goes through the
/// methods here, from the single event thread; the operator graph model
/// itself stays stateless.
#[derive(Debug, Clone)]
pub struct ActiveProject {
    name: String,
    spatial_reference: SpatialReference,
    time: Time,
    layers: Vec<Layer>,
    plots: Vec<Plot>,
    next_layer_id: u32,
    next_plot_id: u32,
}

impl ActiveProject {
    pub fn new(name: impl Into<String>, spatial_reference: SpatialReference, time: Time) -> Self {
        Self {
            name: name.into(),
            spatial_reference,
            time,
            layers: Vec::new(),
            plots: Vec::new(),
            next_layer_id: 0,
            next_plot_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spatial_reference(&self) -> &SpatialReference {
        &self.spatial_reference
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    /// Topmost first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Materializes a registered workflow as a layer on top of the layer
    /// stack, fetching its result descriptor and deriving a default
    /// symbology when the caller supplies none.
    ///
    /// Fails for plot workflows and when the id cannot be resolved; the
    /// layer stack is untouched on failure.
    pub async fn add_layer_from_workflow<R>(
        &mut self,
        registry: &R,
        name: impl Into<String>,
        workflow_id: WorkflowId,
        symbology: Option<Symbology>,
    ) -> Result<&Layer>
    where
        R: WorkflowRegistry + ?Sized,
    {
        let descriptor = registry.get_workflow_metadata(workflow_id).await?;
        let metadata = LayerMetadata::try_from(descriptor)?;

        let symbology = symbology.unwrap_or_else(|| match &metadata {
            LayerMetadata::Raster(_) => Symbology::default_raster(),
            LayerMetadata::Vector(descriptor) => Symbology::default_vector(descriptor.data_type),
        });

        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;

        let layer = Layer {
            id,
            workflow_id,
            name: name.into(),
            metadata,
            symbology,
            is_visible: true,
            is_legend_visible: false,
        };

        self.layers.insert(0, layer);
        Ok(&self.layers[0])
    }

    /// Removes a layer; `true` if it was present.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() < before
    }

    /// Binds a registered plot workflow under a project-scoped plot id.
    pub fn add_plot(&mut self, name: impl Into<String>, workflow_id: WorkflowId) -> &Plot {
        let id = PlotId(self.next_plot_id);
        self.next_plot_id += 1;

        self.plots.insert(
            0,
            Plot {
                id,
                workflow_id,
                name: name.into(),
            },
        );
        &self.plots[0]
    }

    pub fn remove_plot(&mut self, id: PlotId) -> bool {
        let before = self.plots.len();
        self.plots.retain(|plot| plot.id != id);
        self.plots.len() < before
    }
}
