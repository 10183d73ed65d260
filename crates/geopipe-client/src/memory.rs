//! In-memory workflow registry for development and testing.
//!
//! `RwLock::unwrap()` is used intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an unrecoverable
//! state. Production use goes through the HTTP adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use geopipe_core::error::{GeopipeError, Result};
use geopipe_core::models::TypedResultDescriptor;
use geopipe_workflow::workflow::{Workflow, WorkflowId};

use crate::ports::WorkflowRegistry;

/// In-memory implementation of [`WorkflowRegistry`].
///
/// Mirrors the backend's contract: every registration yields a fresh id,
/// even for structurally identical workflows.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    workflows: Arc<RwLock<HashMap<WorkflowId, Workflow>>>,
    descriptors: Arc<RwLock<HashMap<WorkflowId, TypedResultDescriptor>>>,
}

impl MemoryRegistry {
    /// Create a new in-memory registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the result descriptor that metadata lookups for `id` return.
    pub fn set_metadata(&self, id: WorkflowId, descriptor: TypedResultDescriptor) {
        let mut descriptors = self.descriptors.write().unwrap();
        descriptors.insert(id, descriptor);
    }

    /// Register a workflow together with its result descriptor.
    pub async fn register_with_metadata(
        &self,
        workflow: &Workflow,
        descriptor: TypedResultDescriptor,
    ) -> Result<WorkflowId> {
        let id = self.register_workflow(workflow).await?;
        self.set_metadata(id, descriptor);
        Ok(id)
    }

    /// Number of registered workflows.
    pub fn workflow_count(&self) -> usize {
        self.workflows.read().unwrap().len()
    }
}

#[async_trait]
impl WorkflowRegistry for MemoryRegistry {
    async fn register_workflow(&self, workflow: &Workflow) -> Result<WorkflowId> {
        let id = WorkflowId(Uuid::new_v4());
        let mut workflows = self.workflows.write().unwrap();
        workflows.insert(id, workflow.clone());
        Ok(id)
    }

    async fn get_workflow(&self, id: WorkflowId) -> Result<Workflow> {
        let workflows = self.workflows.read().unwrap();
        workflows
            .get(&id)
            .cloned()
            .ok_or(GeopipeError::WorkflowNotFound { id: id.0 })
    }

    async fn get_workflow_metadata(&self, id: WorkflowId) -> Result<TypedResultDescriptor> {
        let descriptors = self.descriptors.read().unwrap();
        descriptors
            .get(&id)
            .cloned()
            .ok_or(GeopipeError::WorkflowNotFound { id: id.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geopipe_workflow::data_id::DataId;
    use geopipe_workflow::operator::TypedOperator;

    fn workflow() -> Workflow {
        Workflow::vector(TypedOperator::ogr_source(DataId::internal(Uuid::nil()))).unwrap()
    }

    #[tokio::test]
    async fn test_registration_yields_fresh_ids() {
        let registry = MemoryRegistry::new();

        let first = registry.register_workflow(&workflow()).await.unwrap();
        let second = registry.register_workflow(&workflow()).await.unwrap();

        // no dedup of structurally identical workflows
        assert_ne!(first, second);
        assert_eq!(registry.workflow_count(), 2);
    }

    #[tokio::test]
    async fn test_roundtrip() {
        let registry = MemoryRegistry::new();
        let workflow = workflow();

        let id = registry.register_workflow(&workflow).await.unwrap();
        let stored = registry.get_workflow(id).await.unwrap();
        assert_eq!(stored, workflow);
    }

    #[tokio::test]
    async fn test_unknown_id_errors() {
        let registry = MemoryRegistry::new();
        let id = WorkflowId(Uuid::new_v4());

        assert!(matches!(
            registry.get_workflow(id).await,
            Err(GeopipeError::WorkflowNotFound { .. })
        ));
        assert!(matches!(
            registry.get_workflow_metadata(id).await,
            Err(GeopipeError::WorkflowNotFound { .. })
        ));
    }
}
