use serde::{Deserialize, Serialize};

use fieldservice_core::{DocumentId, GroupId, LineItemId};

use crate::coerce::{lenient_flag, lenient_number, lenient_sort_order, lenient_text};

/// A single row on a document (labor, materials, permit, text note).
///
/// Field names follow the record store's snake_case columns. Numeric columns
/// are kept as `Option<f64>` exactly as stored; pricing resolves defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub document_id: DocumentId,
    #[serde(default)]
    pub group_id: Option<GroupId>,

    /// Informational tag only; never used in arithmetic.
    #[serde(default, deserialize_with = "lenient_text")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub qty: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_sort_order")]
    pub sort_order: i64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub labor_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub labor_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub taxable_labor: bool,

    #[serde(default, deserialize_with = "lenient_number")]
    pub materials_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub materials_markup_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub taxable_materials: bool,

    /// Timestamp string; only used as a tie-breaking sort key.
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
}

impl LineItem {
    /// A blank, ungrouped item with every optional column absent.
    pub fn new(id: impl Into<LineItemId>, document_id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            document_id: document_id.into(),
            group_id: None,
            item_type: None,
            title: None,
            description: None,
            qty: None,
            unit: None,
            sort_order: 0,
            labor_hours: None,
            labor_rate: None,
            taxable_labor: false,
            materials_cost: None,
            materials_markup_pct: None,
            taxable_materials: false,
            created_at: None,
        }
    }

    /// Group this item belongs to; a blank group id counts as ungrouped.
    pub fn group_key(&self) -> Option<&GroupId> {
        self.group_id
            .as_ref()
            .filter(|g| !g.as_str().trim().is_empty())
    }

    /// `created_at` as a sort key, absent sorting first.
    pub fn created_at_key(&self) -> &str {
        self.created_at.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_row_with_nulls() {
        let row = r#"{
            "id": "li-1",
            "document_id": "doc-1",
            "group_id": null,
            "item_type": "labor",
            "title": "Replace valve",
            "description": null,
            "qty": null,
            "unit": "ea",
            "sort_order": 3,
            "labor_hours": 2,
            "labor_rate": 95.5,
            "taxable_labor": null,
            "materials_cost": null,
            "materials_markup_pct": null,
            "taxable_materials": true,
            "created_at": "2025-01-02T10:00:00+00:00"
        }"#;

        let item: LineItem = serde_json::from_str(row).unwrap();
        assert_eq!(item.id.as_str(), "li-1");
        assert_eq!(item.group_id, None);
        assert_eq!(item.item_type.as_deref(), Some("labor"));
        assert_eq!(item.qty, None);
        assert_eq!(item.sort_order, 3);
        assert_eq!(item.labor_hours, Some(2.0));
        assert_eq!(item.labor_rate, Some(95.5));
        assert!(!item.taxable_labor);
        assert!(item.taxable_materials);
        assert_eq!(item.created_at_key(), "2025-01-02T10:00:00+00:00");
    }

    #[test]
    fn decodes_minimal_row() {
        let item: LineItem =
            serde_json::from_str(r#"{"id":"a","document_id":"d","labor_rate":"n/a"}"#).unwrap();
        assert_eq!(item, LineItem::new("a", "d"));
    }

    #[test]
    fn blank_group_id_is_ungrouped() {
        let mut item = LineItem::new("a", "d");
        item.group_id = Some(GroupId::from(""));
        assert_eq!(item.group_key(), None);

        item.group_id = Some(GroupId::from("g1"));
        assert_eq!(item.group_key().map(GroupId::as_str), Some("g1"));
    }
}
