//! Document-level (and section-level) roll-ups.
//!
//! No tax rate is applied here: `taxable_subtotal` is only the base a later
//! tax calculation would use.

use serde::Serialize;

use crate::coerce::saturate;
use crate::line_item::LineItem;
use crate::pricing::ComputedLine;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DocumentTotals {
    /// Sum of every `line_total`.
    pub subtotal: f64,
    /// Sum of every `taxable_amount`.
    pub taxable_subtotal: f64,
}

/// Same accumulator, scoped to one section.
pub type SectionTotals = DocumentTotals;

impl DocumentTotals {
    pub fn add(&mut self, line: &ComputedLine) {
        self.subtotal = saturate(self.subtotal + line.line_total);
        self.taxable_subtotal = saturate(self.taxable_subtotal + line.taxable_amount);
    }
}

/// Visit every item exactly once, independent of sectioning.
pub fn compute_totals<'a, I>(line_items: I) -> DocumentTotals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    line_items
        .into_iter()
        .fold(DocumentTotals::default(), |mut totals, item| {
            totals.add(&ComputedLine::from_item(item));
            totals
        })
}
