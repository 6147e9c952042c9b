//! Infrastructure layer: record store access, snapshots, settings, rendering.

pub mod renderer;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use renderer::{DocumentRenderer, RenderError};
pub use settings::RenderSettings;
pub use snapshot::DocumentSnapshot;
pub use store::{DocumentRecordStore, InMemoryDocumentStore, StoreError};
