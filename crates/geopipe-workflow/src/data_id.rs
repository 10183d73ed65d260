use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a dataset a source operator reads from.
///
/// `Internal` data lives in the backend's own catalog; `External` data is
/// served by a registered data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataId {
    #[serde(rename_all = "camelCase")]
    Internal { dataset_id: Uuid },
    #[serde(rename_all = "camelCase")]
    External { provider_id: Uuid, layer_id: String },
}

impl DataId {
    pub fn internal(dataset_id: Uuid) -> Self {
        Self::Internal { dataset_id }
    }

    pub fn external(provider_id: Uuid, layer_id: impl Into<String>) -> Self {
        Self::External {
            provider_id,
            layer_id: layer_id.into(),
        }
    }
}
