//! Price book: reusable catalog entries that seed new document line items.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use fieldservice_core::{DocumentId, DomainError, DomainResult, GroupId, LineItemId, PriceBookItemId};

use crate::coerce::{DEFAULT_QTY, coerce_number, lenient_flag, lenient_number, lenient_text};
use crate::line_item::LineItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBookItem {
    pub id: PriceBookItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pricing_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub default_qty: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_unit: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub labor_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub labor_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub taxable_labor: bool,

    #[serde(default, deserialize_with = "lenient_number")]
    pub materials_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub materials_markup_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub taxable_materials: bool,

    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
}

/// Where and when a price book entry is placed on a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceLineItem {
    pub document_id: DocumentId,
    pub group_id: Option<GroupId>,
    pub line_item_id: LineItemId,
    pub sort_order: i64,
    pub occurred_at: DateTime<Utc>,
}

impl PriceBookItem {
    pub fn new(id: impl Into<PriceBookItemId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            item_type: None,
            pricing_mode: None,
            default_qty: None,
            unit: None,
            default_unit: None,
            labor_rate: None,
            labor_hours: None,
            taxable_labor: false,
            materials_cost: None,
            materials_markup_pct: None,
            taxable_materials: false,
            created_at: None,
        }
    }

    /// `unit`, else `default_unit`.
    pub fn display_unit(&self) -> Option<&str> {
        self.unit.as_deref().or(self.default_unit.as_deref())
    }

    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
            self.item_type.as_deref().unwrap_or(""),
            self.pricing_mode.as_deref().unwrap_or(""),
        )
        .to_lowercase()
    }

    /// Case-insensitive substring match; a blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.haystack().contains(&q)
    }

    /// Instantiate a document line item carrying this entry's pricing.
    pub fn to_line_item(&self, place: PlaceLineItem) -> DomainResult<LineItem> {
        if place.document_id.as_str().trim().is_empty() {
            return Err(DomainError::validation(
                "cannot place price book item without a document",
            ));
        }

        Ok(LineItem {
            id: place.line_item_id,
            document_id: place.document_id,
            group_id: place.group_id,
            item_type: self.item_type.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            qty: Some(coerce_number(self.default_qty, DEFAULT_QTY)),
            unit: self.display_unit().map(str::to_string),
            sort_order: place.sort_order,
            labor_hours: self.labor_hours,
            labor_rate: self.labor_rate,
            taxable_labor: self.taxable_labor,
            materials_cost: self.materials_cost,
            materials_markup_pct: self.materials_markup_pct,
            taxable_materials: self.taxable_materials,
            created_at: Some(
                place
                    .occurred_at
                    .to_rfc3339_opts(SecondsFormat::Micros, false),
            ),
        })
    }
}

/// Case-insensitive substring search over title, description, type and
/// pricing mode. A blank query returns everything in input order.
pub fn search_price_book<'a>(items: &'a [PriceBookItem], query: &str) -> Vec<&'a PriceBookItem> {
    items.iter().filter(|it| it.matches(query)).collect()
}

/// Look up the entry a caller asked to place on a document.
pub fn find_price_book_item<'a>(
    items: &'a [PriceBookItem],
    id: &PriceBookItemId,
) -> DomainResult<&'a PriceBookItem> {
    items
        .iter()
        .find(|it| &it.id == id)
        .ok_or_else(DomainError::not_found)
}

/// Sort order that places a new item after everything already in `group_id`.
pub fn next_sort_order(items: &[LineItem], group_id: Option<&GroupId>) -> i64 {
    items
        .iter()
        .filter(|it| it.group_key() == group_id)
        .map(|it| it.sort_order)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}
