//! Record store abstraction for document line items and groups.
//!
//! The hosted record store is reached through an explicitly constructed
//! [`DocumentRecordStore`] handed to whoever needs it. There is no global
//! client.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use fieldservice_core::DocumentId;
use fieldservice_documents::{Group, LineItem};

use crate::snapshot::DocumentSnapshot;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid document snapshot: {0}")]
    Snapshot(String),
}

/// Read access to the records that make up one document.
pub trait DocumentRecordStore: Send + Sync {
    /// Line items of a document, in store order.
    fn line_items(&self, document_id: &DocumentId) -> Result<Vec<LineItem>, StoreError>;

    /// Groups of a document, in store order.
    fn groups(&self, document_id: &DocumentId) -> Result<Vec<Group>, StoreError>;
}

impl<S> DocumentRecordStore for Arc<S>
where
    S: DocumentRecordStore + ?Sized,
{
    fn line_items(&self, document_id: &DocumentId) -> Result<Vec<LineItem>, StoreError> {
        (**self).line_items(document_id)
    }

    fn groups(&self, document_id: &DocumentId) -> Result<Vec<Group>, StoreError> {
        (**self).groups(document_id)
    }
}

#[derive(Debug, Default, Clone)]
struct DocumentRecords {
    line_items: Vec<LineItem>,
    groups: Vec<Group>,
}

/// In-memory document store for tests/dev and snapshot rendering.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<DocumentId, DocumentRecords>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document with no records yet.
    pub fn create_document(&self, document_id: DocumentId) -> Result<(), StoreError> {
        let mut map = self.write()?;
        map.entry(document_id).or_default();
        Ok(())
    }

    /// Appends under the item's own `document_id`.
    pub fn insert_line_item(&self, item: LineItem) -> Result<(), StoreError> {
        let mut map = self.write()?;
        map.entry(item.document_id.clone())
            .or_default()
            .line_items
            .push(item);
        Ok(())
    }

    pub fn insert_group(&self, group: Group) -> Result<(), StoreError> {
        let mut map = self.write()?;
        map.entry(group.document_id.clone())
            .or_default()
            .groups
            .push(group);
        Ok(())
    }

    /// Replace everything stored for the snapshot's document.
    pub fn load_snapshot(&self, snapshot: DocumentSnapshot) -> Result<(), StoreError> {
        let mut map = self.write()?;
        map.insert(
            snapshot.document_id,
            DocumentRecords {
                line_items: snapshot.line_items,
                groups: snapshot.groups,
            },
        );
        Ok(())
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<DocumentId, DocumentRecords>>, StoreError>
    {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn read_document<T>(
        &self,
        document_id: &DocumentId,
        f: impl FnOnce(&DocumentRecords) -> T,
    ) -> Result<T, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.get(document_id)
            .map(f)
            .ok_or_else(|| StoreError::DocumentNotFound(document_id.clone()))
    }
}

impl DocumentRecordStore for InMemoryDocumentStore {
    fn line_items(&self, document_id: &DocumentId) -> Result<Vec<LineItem>, StoreError> {
        self.read_document(document_id, |doc| doc.line_items.clone())
    }

    fn groups(&self, document_id: &DocumentId) -> Result<Vec<Group>, StoreError> {
        self.read_document(document_id, |doc| doc.groups.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_document_is_not_found() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("nope");
        assert_eq!(
            store.line_items(&id).unwrap_err(),
            StoreError::DocumentNotFound(id.clone())
        );
        assert!(matches!(store.groups(&id), Err(StoreError::DocumentNotFound(_))));
    }

    #[test]
    fn created_document_starts_empty() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::from("doc-1");
        store.create_document(id.clone()).unwrap();
        assert!(store.line_items(&id).unwrap().is_empty());
        assert!(store.groups(&id).unwrap().is_empty());
    }

    #[test]
    fn records_are_scoped_per_document_and_keep_insertion_order() {
        let store = InMemoryDocumentStore::new();
        store.insert_line_item(LineItem::new("b", "doc-1")).unwrap();
        store.insert_line_item(LineItem::new("a", "doc-1")).unwrap();
        store.insert_line_item(LineItem::new("x", "doc-2")).unwrap();
        store.insert_group(Group::new("g1", "doc-1")).unwrap();

        let ids: Vec<_> = store
            .line_items(&DocumentId::from("doc-1"))
            .unwrap()
            .into_iter()
            .map(|li| li.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.groups(&DocumentId::from("doc-1")).unwrap().len(), 1);
        assert!(store.groups(&DocumentId::from("doc-2")).unwrap().is_empty());
    }

    #[test]
    fn shared_store_is_usable_through_arc() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.insert_line_item(LineItem::new("a", "doc-1")).unwrap();

        fn count<S: DocumentRecordStore>(s: &S) -> usize {
            s.line_items(&DocumentId::from("doc-1")).unwrap().len()
        }
        assert_eq!(count(&store), 1);
    }
}
