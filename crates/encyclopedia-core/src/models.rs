//! Data models for Encyclopedia
//!
//! An entry is nothing more than a name and its markdown content. Names are
//! unique ignoring case; the stored name keeps the case it was created with.

/// A named markdown document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Canonical name, case preserved as stored
    pub name: String,
    /// Raw markdown content
    pub content: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Result of looking an entry up by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLookup {
    /// An entry matched (ignoring case)
    Found(Entry),
    /// No entry has this name
    NotFound,
}

impl EntryLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, EntryLookup::Found(_))
    }

    /// Consume the lookup, yielding the entry if one was found
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            EntryLookup::Found(entry) => Some(entry),
            EntryLookup::NotFound => None,
        }
    }
}

impl From<Option<Entry>> for EntryLookup {
    fn from(entry: Option<Entry>) -> Self {
        match entry {
            Some(entry) => EntryLookup::Found(entry),
            None => EntryLookup::NotFound,
        }
    }
}
