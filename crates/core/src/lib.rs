//! `fieldservice-core`: shared building blocks for the document crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, GroupId, LineItemId, PriceBookItemId};
