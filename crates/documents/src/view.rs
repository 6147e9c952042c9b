//! Owned, serializable view-model handed to renderers.

use serde::Serialize;

use fieldservice_core::LineItemId;

use crate::group::Group;
use crate::line_item::LineItem;
use crate::money::{Currency, MoneyFormatter};
use crate::pricing::ComputedLine;
use crate::sections::build_sections;
use crate::totals::{DocumentTotals, SectionTotals};

/// Title shown for rows without one.
pub const UNTITLED: &str = "(no title)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub id: LineItemId,
    pub item_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    #[serde(flatten)]
    pub amounts: ComputedLine,
    pub line_total_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: String,
    pub label: String,
    pub rows: Vec<LineView>,
    pub totals: SectionTotals,
    pub subtotal_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub currency: Currency,
    pub sections: Vec<SectionView>,
    pub totals: DocumentTotals,
    pub subtotal_display: String,
    pub taxable_subtotal_display: String,
}

impl LineView {
    fn build(item: &LineItem, money: &MoneyFormatter) -> Self {
        let amounts = ComputedLine::from_item(item);
        let title = item
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED)
            .to_string();

        Self {
            id: item.id.clone(),
            item_type: item.item_type.clone(),
            title,
            description: item.description.clone(),
            unit: item.unit.clone(),
            line_total_display: money.format(amounts.line_total),
            amounts,
        }
    }
}

impl DocumentView {
    /// Price, section and total a document in one go.
    ///
    /// Section subtotals are accumulated from each section's rows; the
    /// document totals walk the full item list once, independent of
    /// sectioning.
    pub fn build(line_items: &[LineItem], groups: &[Group], money: &MoneyFormatter) -> Self {
        let sections = build_sections(line_items, groups)
            .into_iter()
            .map(|section| {
                let rows: Vec<LineView> = section
                    .items
                    .iter()
                    .map(|item| LineView::build(item, money))
                    .collect();

                let mut totals = SectionTotals::default();
                for row in &rows {
                    totals.add(&row.amounts);
                }

                SectionView {
                    key: section.key.as_str().to_string(),
                    label: section.label,
                    subtotal_display: money.format(totals.subtotal),
                    rows,
                    totals,
                }
            })
            .collect();

        let totals = crate::totals::compute_totals(line_items);

        Self {
            currency: money.currency(),
            sections,
            subtotal_display: money.format(totals.subtotal),
            taxable_subtotal_display: money.format(totals.taxable_subtotal),
            totals,
        }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldservice_core::GroupId;

    fn fixture() -> (Vec<LineItem>, Vec<Group>) {
        let items = vec![
            LineItem {
                title: Some("Service call".to_string()),
                labor_hours: Some(1.0),
                labor_rate: Some(125.0),
                taxable_labor: true,
                ..LineItem::new("item1", "doc-1")
            },
            LineItem {
                item_type: Some("text".to_string()),
                description: Some("Warranty: 1 year parts".to_string()),
                ..LineItem::new("item2", "doc-1")
            },
            LineItem {
                group_id: Some(GroupId::from("g1")),
                title: Some("Water heater".to_string()),
                unit: Some("ea".to_string()),
                qty: Some(1.0),
                materials_cost: Some(1000.0),
                materials_markup_pct: Some(15.0),
                taxable_materials: true,
                ..LineItem::new("item3", "doc-1")
            },
        ];
        let groups = vec![Group {
            name: Some("Plumbing".to_string()),
            sort_order: 1,
            ..Group::new("g1", "doc-1")
        }];
        (items, groups)
    }

    #[test]
    fn builds_sections_rows_and_totals() {
        let (items, groups) = fixture();
        let view = DocumentView::build(&items, &groups, &MoneyFormatter::default());

        assert_eq!(view.currency, Currency::Usd);
        assert_eq!(view.row_count(), 3);
        assert_eq!(view.sections.len(), 2);

        let plumbing = &view.sections[0];
        assert_eq!(plumbing.key, "g1");
        assert_eq!(plumbing.label, "Plumbing");
        assert_eq!(plumbing.rows[0].title, "Water heater");
        assert_eq!(plumbing.rows[0].line_total_display, "$1,150.00");
        assert_eq!(plumbing.subtotal_display, "$1,150.00");

        let ungrouped = &view.sections[1];
        assert_eq!(ungrouped.key, "ungrouped");
        assert_eq!(ungrouped.label, "Items");
        assert_eq!(ungrouped.rows[1].title, UNTITLED);
        assert_eq!(ungrouped.totals.subtotal, 125.0);

        assert_eq!(view.totals.subtotal, 1275.0);
        assert_eq!(view.totals.taxable_subtotal, 1275.0);
        assert_eq!(view.subtotal_display, "$1,275.00");
    }

    #[test]
    fn serializes_rows_with_flattened_amounts() {
        let (items, groups) = fixture();
        let view = DocumentView::build(&items, &groups, &MoneyFormatter::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["currency"], "USD");
        let row = &json["sections"][0]["rows"][0];
        assert_eq!(row["id"], "item3");
        assert_eq!(row["materials_total"], 1150.0);
        assert_eq!(row["qty"], 1.0);
        assert_eq!(json["totals"]["taxable_subtotal"], 1275.0);
    }

    #[test]
    fn empty_document_renders_no_sections() {
        let view = DocumentView::build(&[], &[], &MoneyFormatter::new(Currency::Eur));
        assert!(view.sections.is_empty());
        assert_eq!(view.subtotal_display, "€0.00");
    }
}
