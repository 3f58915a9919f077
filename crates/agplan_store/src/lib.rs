//! Durable storage for solved floorplans.
//!
//! The engine persists its finalized partition set here once per build
//! invocation; a later, vendor-specific stage reads it back to emit placement
//! directives. Files are versioned, checksummed, and replaced atomically, so a
//! reader never observes a partially written result.

#![warn(missing_docs)]

pub mod artifact;
pub mod error;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use record::{FloorplanResult, StoredPartition, HOLE_ATTRIBUTE};
pub use store::{ResultStore, ResultVariant};
