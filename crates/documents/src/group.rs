use serde::{Deserialize, Serialize};

use fieldservice_core::{DocumentId, GroupId};

use crate::coerce::{lenient_sort_order, lenient_text};

/// Label used when a group has no usable name.
pub const DEFAULT_GROUP_LABEL: &str = "Group";

/// A named bucket of line items, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub document_id: DocumentId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_sort_order")]
    pub sort_order: i64,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, document_id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            document_id: document_id.into(),
            name: None,
            title: None,
            label: None,
            sort_order: 0,
        }
    }

    /// First non-blank of `name`, `title`, `label`, else [`DEFAULT_GROUP_LABEL`].
    pub fn display_label(&self) -> &str {
        [&self.name, &self.title, &self.label]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_GROUP_LABEL)
    }
}
