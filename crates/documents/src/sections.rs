//! Grouping and ordering of line items into presentation sections.
//!
//! Items are bucketed in a single pass (one insertion buffer per known
//! group plus a trailing ungrouped buffer), buffers are sorted with a stable
//! sort, and the result is flattened in group `sort_order` order. Empty
//! buckets are never emitted.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use fieldservice_core::GroupId;

use crate::group::Group;
use crate::line_item::LineItem;
use crate::totals::{SectionTotals, compute_totals};

/// Synthetic key of the trailing section.
pub const UNGROUPED_KEY: &str = "ungrouped";

/// Label of the trailing section.
pub const UNGROUPED_LABEL: &str = "Items";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SectionKey {
    Group(GroupId),
    Ungrouped,
}

impl SectionKey {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Group(id) => id.as_str(),
            SectionKey::Ungrouped => UNGROUPED_KEY,
        }
    }
}

impl From<SectionKey> for String {
    fn from(value: SectionKey) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty, ordered presentation unit borrowing its rows from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub key: SectionKey,
    pub label: String,
    pub items: Vec<&'a LineItem>,
}

impl<'a> Section<'a> {
    pub fn is_ungrouped(&self) -> bool {
        self.key == SectionKey::Ungrouped
    }

    pub fn totals(&self) -> SectionTotals {
        compute_totals(self.items.iter().copied())
    }
}

/// Row order within a section: `sort_order`, then `created_at` (byte-wise).
///
/// Equal rows compare `Equal`; callers rely on a stable sort to keep input
/// order as the final tie-breaker.
pub fn compare_line_items(a: &LineItem, b: &LineItem) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| a.created_at_key().cmp(b.created_at_key()))
}

/// Partition `line_items` into ordered sections.
///
/// Items referencing a group id that is not in `groups` are placed in the
/// ungrouped section so every input item appears exactly once.
pub fn build_sections<'a>(line_items: &'a [LineItem], groups: &[Group]) -> Vec<Section<'a>> {
    let mut slot_by_group: HashMap<&GroupId, usize> = HashMap::with_capacity(groups.len());
    let mut known: Vec<&Group> = Vec::with_capacity(groups.len());
    for group in groups {
        if slot_by_group.contains_key(&group.id) {
            tracing::debug!(group_id = %group.id, "ignoring duplicate group");
            continue;
        }
        slot_by_group.insert(&group.id, known.len());
        known.push(group);
    }

    let mut buffers: Vec<Vec<&'a LineItem>> = vec![Vec::new(); known.len()];
    let mut ungrouped: Vec<&'a LineItem> = Vec::new();
    let mut orphans = 0usize;

    for item in line_items {
        match item.group_key() {
            Some(group_id) => match slot_by_group.get(group_id) {
                Some(&slot) => buffers[slot].push(item),
                // Unknown group: list it as ungrouped rather than dropping it.
                // Every item lands in exactly one section, even though the
                // ungrouped section then exists without any group-less item.
                None => {
                    orphans += 1;
                    ungrouped.push(item);
                }
            },
            None => ungrouped.push(item),
        }
    }

    if orphans > 0 {
        tracing::debug!(orphans, "line items reference unknown groups; listing as ungrouped");
    }

    // Stable: equal sort orders keep the caller's group order.
    let mut order: Vec<usize> = (0..known.len()).collect();
    order.sort_by_key(|&slot| known[slot].sort_order);

    let mut sections = Vec::with_capacity(known.len() + 1);
    for slot in order {
        let mut items = std::mem::take(&mut buffers[slot]);
        if items.is_empty() {
            continue;
        }
        items.sort_by(|a, b| compare_line_items(a, b));
        let group = known[slot];
        sections.push(Section {
            key: SectionKey::Group(group.id.clone()),
            label: group.display_label().to_string(),
            items,
        });
    }

    if !ungrouped.is_empty() {
        ungrouped.sort_by(|a, b| compare_line_items(a, b));
        sections.push(Section {
            key: SectionKey::Ungrouped,
            label: UNGROUPED_LABEL.to_string(),
            items: ungrouped,
        });
    }

    tracing::trace!(
        items = line_items.len(),
        groups = known.len(),
        sections = sections.len(),
        "built sections"
    );

    sections
}
