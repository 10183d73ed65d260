//! Port trait for the remote workflow backend.

use async_trait::async_trait;

use geopipe_core::error::Result;
use geopipe_core::models::TypedResultDescriptor;
use geopipe_workflow::workflow::{Workflow, WorkflowId};

/// The backend collaborator this client composes against.
///
/// Registration is the only mutating operation. It is not idempotent: two
/// structurally identical workflows may receive different ids. The two
/// getters are read-only. Calls run to completion or failure; there is no
/// mid-flight cancellation and no automatic retry.
#[async_trait]
pub trait WorkflowRegistry: Send + Sync {
    /// Register a workflow and return its backend-assigned id.
    async fn register_workflow(&self, workflow: &Workflow) -> Result<WorkflowId>;

    /// Retrieve a previously registered operator tree for recomposition.
    async fn get_workflow(&self, id: WorkflowId) -> Result<Workflow>;

    /// Discover the output shape of a workflow without executing it.
    async fn get_workflow_metadata(&self, id: WorkflowId) -> Result<TypedResultDescriptor>;
}
