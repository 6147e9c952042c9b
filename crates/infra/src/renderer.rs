//! Fetch a document's records and turn them into a view-model.

use thiserror::Error;

use fieldservice_core::DocumentId;
use fieldservice_documents::DocumentView;

use crate::settings::RenderSettings;
use crate::store::{DocumentRecordStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Renders documents from an explicitly supplied record store.
#[derive(Debug)]
pub struct DocumentRenderer<S> {
    store: S,
    settings: RenderSettings,
}

impl<S> DocumentRenderer<S>
where
    S: DocumentRecordStore,
{
    pub fn new(store: S, settings: RenderSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Records whose `document_id` does not match are dropped before pricing.
    #[tracing::instrument(skip_all, fields(document_id = %document_id))]
    pub fn render(&self, document_id: &DocumentId) -> Result<DocumentView, RenderError> {
        let mut line_items = self.store.line_items(document_id)?;
        let mut groups = self.store.groups(document_id)?;

        let fetched_items = line_items.len();
        let fetched_groups = groups.len();
        line_items.retain(|li| &li.document_id == document_id);
        groups.retain(|g| &g.document_id == document_id);

        if line_items.len() != fetched_items || groups.len() != fetched_groups {
            tracing::warn!(
                dropped_items = fetched_items - line_items.len(),
                dropped_groups = fetched_groups - groups.len(),
                "store returned records for another document"
            );
        }

        let view = DocumentView::build(&line_items, &groups, &self.settings.money_formatter());

        tracing::info!(
            sections = view.sections.len(),
            rows = view.row_count(),
            subtotal = view.totals.subtotal,
            "rendered document"
        );

        Ok(view)
    }
}
