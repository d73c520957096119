//! Encyclopedia Core Library
//!
//! This crate provides the core functionality for Encyclopedia, a small
//! wiki that keeps one markdown file per entry.
//!
//! # Architecture
//!
//! - **Flat files**: each entry lives at `<entries_dir>/<name>.md`; the
//!   directory listing is the index
//! - **Wiki operations**: list, view, search, add, edit and random, each
//!   returning an explicit outcome for the web layer to render
//!
//! # Quick Start
//!
//! ```text
//! let store = EntryStore::open(&config.entries_dir)?;
//! let wiki = Wiki::new(store);
//!
//! // Create an entry
//! wiki.add(EntryForm::new("Rust", "# Rust\nA language."))?;
//!
//! // Render it
//! let page = wiki.view("rust");
//! ```
//!
//! # Modules
//!
//! - `storage`: Flat-file entry store and storage errors
//! - `models`: Entry and lookup result types
//! - `form`: Entry form validation
//! - `markdown`: Markdown to HTML rendering
//! - `wiki`: Request-level operations built on the store
//! - `config`: Application configuration

pub mod config;
pub mod form;
pub mod markdown;
pub mod models;
pub mod storage;
pub mod wiki;

pub use config::Config;
pub use form::{EntryForm, FormError};
pub use models::{Entry, EntryLookup};
pub use storage::{EntryStore, StorageError, StorageResult};
pub use wiki::{AddOutcome, EditOutcome, EditPage, EntryPage, SearchOutcome, Wiki, WikiError};
