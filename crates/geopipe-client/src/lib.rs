//! Geopipe Client - Backend access and layer materialization.
//!
//! This crate holds the asynchronous side of workflow composition: the
//! [`ports::WorkflowRegistry`] port with its HTTP and in-memory adapters,
//! projection harmonization across registered workflows, and the active
//! project's layer and plot state.

pub mod harmonize;
pub mod http;
pub mod layer;
pub mod memory;
pub mod ports;
pub mod project;
pub mod symbology;

pub use harmonize::{projected_operators, projected_operators_from_layers};
pub use http::HttpRegistry;
pub use layer::{Layer, LayerId, LayerMetadata, Plot, PlotId};
pub use memory::MemoryRegistry;
pub use ports::WorkflowRegistry;
pub use project::ActiveProject;
pub use symbology::Symbology;
