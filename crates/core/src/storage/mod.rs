//! Storage layer: record collections, the content store, and disk persistence.
//!
//! Data lives in memory in [`RecordCollection`]s grouped by a [`Store`].
//! Durability comes from rewriting each collection's JSON file in full on
//! every mutation (atomic temp-file + rename).

/// Generic lock-protected record collection mirrored to one file.
pub mod collection;
/// Whole-file JSON read/write with atomic replacement.
pub mod persistence;
/// Chapter and quiz store with the content-specific queries.
pub mod store;

pub use collection::RecordCollection;
pub use persistence::{read_records, write_records};
pub use store::Store;
