//! Render a document snapshot (JSON export of one document's rows) to the
//! computed view-model, printed as JSON on stdout.
//!
//! Usage: `render-document <snapshot.json>`

use std::sync::Arc;

use anyhow::{Context, bail};

use fieldservice_infra::{DocumentRenderer, DocumentSnapshot, InMemoryDocumentStore, RenderSettings};

fn main() -> anyhow::Result<()> {
    fieldservice_observability::init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: render-document <snapshot.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot {path}"))?;
    let snapshot = DocumentSnapshot::from_json_str(&raw)
        .with_context(|| format!("failed to parse snapshot {path}"))?;
    let document_id = snapshot.document_id.clone();

    let store = Arc::new(InMemoryDocumentStore::new());
    store.load_snapshot(snapshot)?;

    let settings = RenderSettings::from_env();
    tracing::info!(currency = %settings.currency, %document_id, "rendering snapshot");

    let renderer = DocumentRenderer::new(Arc::clone(&store), settings);
    let view = renderer
        .render(&document_id)
        .with_context(|| format!("failed to render document {document_id}"))?;

    let out = serde_json::to_string_pretty(&view).context("failed to serialize view")?;
    println!("{out}");
    Ok(())
}
