//! Projection harmonization across registered workflows.
//!
//! Before combining several inputs into a multi-source operator, every
//! input's registered operator tree is resolved and, where its spatial
//! reference differs from the first input's, wrapped in a `Reprojection`
//! node. Output order equals input order so that sibling parameter arrays
//! (band names, column lists) stay correlated by index.

use futures::future::try_join_all;

use geopipe_core::error::Result;
use geopipe_core::models::SpatialReference;
use geopipe_workflow::compose::{projection_target, reprojected};
use geopipe_workflow::operator::TypedOperator;
use geopipe_workflow::workflow::WorkflowId;

use crate::layer::Layer;
use crate::ports::WorkflowRegistry;

/// Resolves each workflow id to its operator tree, harmonized to the first
/// input's spatial reference.
///
/// Metadata and workflow fetches for independent inputs run concurrently;
/// `try_join_all` keeps the results in input order. Any resolution failure
/// aborts the whole composition with the backend's error; nothing is
/// registered.
pub async fn projected_operators<R>(
    registry: &R,
    workflow_ids: &[WorkflowId],
) -> Result<Vec<TypedOperator>>
where
    R: WorkflowRegistry + ?Sized,
{
    let descriptors = try_join_all(
        workflow_ids
            .iter()
            .map(|&id| registry.get_workflow_metadata(id)),
    )
    .await?;

    let references: Vec<SpatialReference> = descriptors
        .iter()
        .map(|descriptor| descriptor.spatial_reference().clone())
        .collect();

    let Some(target) = projection_target(&references).cloned() else {
        return Ok(Vec::new());
    };

    let workflows = try_join_all(workflow_ids.iter().map(|&id| registry.get_workflow(id))).await?;

    Ok(workflows
        .into_iter()
        .zip(references)
        .map(|(workflow, reference)| reprojected(workflow.operator, &reference, &target))
        .collect())
}

/// [`projected_operators`] over the workflows behind a set of layers.
pub async fn projected_operators_from_layers<R>(
    registry: &R,
    layers: &[Layer],
) -> Result<Vec<TypedOperator>>
where
    R: WorkflowRegistry + ?Sized,
{
    let workflow_ids: Vec<WorkflowId> = layers.iter().map(|layer| layer.workflow_id).collect();
    projected_operators(registry, &workflow_ids).await
}
