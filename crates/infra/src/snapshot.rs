//! JSON snapshot of one document's records, as exported from the record store.

use serde::{Deserialize, Serialize};

use fieldservice_core::DocumentId;
use fieldservice_documents::{Group, LineItem};

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub document_id: DocumentId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl DocumentSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Snapshot(e.to_string()))
    }
}
