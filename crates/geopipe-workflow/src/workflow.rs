//! The workflow wrapper sent to the backend's registration endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use geopipe_core::error::{GeopipeError, Result};
use geopipe_core::models::TypedResultDescriptor;

use crate::operator::TypedOperator;

/// The kind of result a workflow produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowType {
    Vector,
    Raster,
    Plot,
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowType::Vector => "Vector",
            WorkflowType::Raster => "Raster",
            WorkflowType::Plot => "Plot",
        };
        f.write_str(name)
    }
}

impl From<&TypedResultDescriptor> for WorkflowType {
    fn from(descriptor: &TypedResultDescriptor) -> Self {
        match descriptor {
            TypedResultDescriptor::Raster(_) => WorkflowType::Raster,
            TypedResultDescriptor::Vector(_) => WorkflowType::Vector,
            TypedResultDescriptor::Plot(_) => WorkflowType::Plot,
        }
    }
}

/// Backend-assigned identifier of a registered workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(pub Uuid);

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A typed operator graph ready for registration: the declared result kind
/// plus the root operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    pub operator: TypedOperator,
}

impl Workflow {
    /// Wraps `operator` after checking that it is internally valid and that
    /// it actually produces `workflow_type`.
    pub fn new(workflow_type: WorkflowType, operator: TypedOperator) -> Result<Self> {
        operator.validate()?;

        let produced = operator.result_kind();
        if produced != workflow_type {
            return Err(GeopipeError::WorkflowTypeMismatch {
                declared: workflow_type.to_string(),
                produced: produced.to_string(),
            });
        }

        Ok(Self {
            workflow_type,
            operator,
        })
    }

    pub fn vector(operator: TypedOperator) -> Result<Self> {
        Self::new(WorkflowType::Vector, operator)
    }

    pub fn raster(operator: TypedOperator) -> Result<Self> {
        Self::new(WorkflowType::Raster, operator)
    }

    pub fn plot(operator: TypedOperator) -> Result<Self> {
        Self::new(WorkflowType::Plot, operator)
    }

    /// Wraps `operator` under the kind it produces.
    pub fn for_operator(operator: TypedOperator) -> Result<Self> {
        let workflow_type = operator.result_kind();
        Self::new(workflow_type, operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_id::DataId;

    #[test]
    fn test_type_agreement_is_enforced() {
        let raster = TypedOperator::gdal_source(DataId::internal(Uuid::nil()));

        assert!(Workflow::raster(raster.clone()).is_ok());
        assert!(matches!(
            Workflow::plot(raster.clone()),
            Err(GeopipeError::WorkflowTypeMismatch { .. })
        ));
        assert!(Workflow::vector(raster).is_err());
    }

    #[test]
    fn test_for_operator_picks_the_produced_kind() {
        let vector = TypedOperator::ogr_source(DataId::internal(Uuid::nil()));
        let workflow = Workflow::for_operator(vector).unwrap();
        assert_eq!(workflow.workflow_type, WorkflowType::Vector);
    }

    #[test]
    fn test_wire_shape() {
        let workflow =
            Workflow::vector(TypedOperator::ogr_source(DataId::internal(Uuid::nil()))).unwrap();
        let json = serde_json::to_value(&workflow).unwrap();

        assert_eq!(json["type"], "Vector");
        assert_eq!(json["operator"]["type"], "OgrSource");

        let parsed: Workflow = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, workflow);
    }
}
