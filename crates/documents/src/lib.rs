//! Estimate/invoice document engine.
//!
//! This crate prices line items, groups them into presentation sections and
//! rolls up document subtotals. It is pure deterministic logic (no IO, no
//! HTTP, no storage): callers hand it fully materialized record sets and get
//! back freshly built view-models.

pub mod coerce;
pub mod group;
pub mod line_item;
pub mod money;
pub mod price_book;
pub mod pricing;
pub mod sections;
pub mod totals;
pub mod view;

pub use coerce::{DEFAULT_AMOUNT, DEFAULT_QTY, coerce_number};
pub use group::{DEFAULT_GROUP_LABEL, Group};
pub use line_item::LineItem;
pub use money::{Currency, MoneyFormatter, format_money};
pub use price_book::{
    PlaceLineItem, PriceBookItem, find_price_book_item, next_sort_order, search_price_book,
};
pub use pricing::{ComputedLine, compute_line};
pub use sections::{Section, SectionKey, UNGROUPED_KEY, UNGROUPED_LABEL, build_sections, compare_line_items};
pub use totals::{DocumentTotals, SectionTotals, compute_totals};
pub use view::{DocumentView, LineView, SectionView};
