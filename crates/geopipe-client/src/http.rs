//! HTTP adapter for the workflow backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use geopipe_core::config::ClientConfig;
use geopipe_core::error::{GeopipeError, Result};
use geopipe_core::models::TypedResultDescriptor;
use geopipe_workflow::workflow::{Workflow, WorkflowId};

use crate::ports::WorkflowRegistry;

/// [`WorkflowRegistry`] over the backend's REST API.
pub struct HttpRegistry {
    /// Base URL of the backend API, without a trailing slash
    api_url: String,

    /// Bearer token of the active session
    session_token: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(config: &ClientConfig, session_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.value))
            .build()?;

        Ok(Self {
            api_url: config.api_url.value.trim_end_matches('/').to_string(),
            session_token: session_token.into(),
            client,
        })
    }

    /// Decodes the backend's `{error, message}` body, falling back to the
    /// HTTP status when the body is not in that shape.
    async fn backend_error(response: reqwest::Response) -> GeopipeError {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => GeopipeError::Backend {
                error: body.error,
                message: body.message,
            },
            Err(_) => GeopipeError::Backend {
                error: status.to_string(),
                message: "backend returned an undecodable error response".to_string(),
            },
        }
    }
}

#[async_trait]
impl WorkflowRegistry for HttpRegistry {
    async fn register_workflow(&self, workflow: &Workflow) -> Result<WorkflowId> {
        tracing::debug!(workflow_type = %workflow.workflow_type, "registering workflow");

        let response = self
            .client
            .post(format!("{}/workflow", self.api_url))
            .bearer_auth(&self.session_token)
            .json(workflow)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let body: IdResponse = response.json().await?;
        tracing::debug!(id = %body.id, "workflow registered");
        Ok(WorkflowId(body.id))
    }

    async fn get_workflow(&self, id: WorkflowId) -> Result<Workflow> {
        let response = self
            .client
            .get(format!("{}/workflow/{}", self.api_url, id))
            .bearer_auth(&self.session_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GeopipeError::WorkflowNotFound { id: id.0 });
        }
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn get_workflow_metadata(&self, id: WorkflowId) -> Result<TypedResultDescriptor> {
        let response = self
            .client
            .get(format!("{}/workflow/{}/metadata", self.api_url, id))
            .bearer_auth(&self.session_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GeopipeError::WorkflowNotFound { id: id.0 });
        }
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response.json().await?)
    }
}

/// Response body of the registration endpoint
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: Uuid,
}

/// Error body the backend sends on rejection
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}
