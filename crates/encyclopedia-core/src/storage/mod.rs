//! Storage layer
//!
//! Entries are stored as flat markdown files, one per entry, in a single
//! directory. The file stem is the entry's canonical name; there is no
//! separate index.

pub mod entries;
pub mod error;

pub use entries::{EntryStore, ENTRY_EXTENSION};
pub use error::{StorageError, StorageResult};
