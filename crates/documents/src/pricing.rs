//! Per-line money computation.

use serde::Serialize;

use crate::coerce::{DEFAULT_AMOUNT, DEFAULT_QTY, coerce_number, saturate};
use crate::line_item::LineItem;

/// Totals derived from one line item. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputedLine {
    /// Resolved quantity. Not multiplied into any total.
    pub qty: f64,
    pub labor_total: f64,
    pub materials_total: f64,
    /// `labor_total + materials_total`.
    pub line_total: f64,
    /// Sum of the component totals whose taxable flag is set.
    pub taxable_amount: f64,
}

impl ComputedLine {
    pub fn from_item(item: &LineItem) -> Self {
        // Quantity is resolved for display but deliberately left out of the
        // arithmetic: hours and cost already describe the whole line.
        let qty = coerce_number(item.qty, DEFAULT_QTY);

        // Finite inputs can still overflow; every total saturates at the
        // f64 range so nothing downstream sees an infinity.
        let labor_total = saturate(
            coerce_number(item.labor_hours, DEFAULT_AMOUNT)
                * coerce_number(item.labor_rate, DEFAULT_AMOUNT),
        );

        let markup_pct = coerce_number(item.materials_markup_pct, DEFAULT_AMOUNT);
        let materials_total = saturate(
            coerce_number(item.materials_cost, DEFAULT_AMOUNT) * (1.0 + markup_pct / 100.0),
        );

        let line_total = saturate(labor_total + materials_total);

        let mut taxable_amount = 0.0;
        if item.taxable_labor {
            taxable_amount += labor_total;
        }
        if item.taxable_materials {
            taxable_amount += materials_total;
        }
        let taxable_amount = saturate(taxable_amount);

        Self {
            qty,
            labor_total,
            materials_total,
            line_total,
            taxable_amount,
        }
    }
}

pub fn compute_line(item: &LineItem) -> ComputedLine {
    ComputedLine::from_item(item)
}
