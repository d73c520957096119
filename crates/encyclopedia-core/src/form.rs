//! Entry form handling
//!
//! The add and edit pages share one form with a `title` and a `content`
//! field. Both are required when creating an entry; editing only reads
//! `content` because the title comes from the URL.

use serde::Deserialize;
use thiserror::Error;

use crate::storage::entries::is_valid_name;

/// Reasons a submitted form is shown again instead of being saved
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// A required field is missing or blank
    #[error("Invalid form")]
    Invalid,
    /// An entry with this title already exists (ignoring case)
    #[error("Entry already exists")]
    AlreadyExists,
}

/// Submitted entry form, exactly as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Cleaned values from a valid new-entry form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
}

impl EntryForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validate a new-entry submission: title and content are both required
    pub fn validate_new(&self) -> Result<NewEntry, FormError> {
        let title = clean_title(&self.title).ok_or(FormError::Invalid)?;
        let content = clean_content(&self.content).ok_or(FormError::Invalid)?;
        Ok(NewEntry { title, content })
    }

    /// Validate an edit submission: only content is required
    pub fn validate_content(&self) -> Result<String, FormError> {
        clean_content(&self.content).ok_or(FormError::Invalid)
    }
}

fn clean_title(raw: &str) -> Option<String> {
    let title = raw.trim();
    is_valid_name(title).then(|| title.to_string())
}

/// Browsers submit textarea line breaks as CRLF
fn clean_content(raw: &str) -> Option<String> {
    let content = raw.trim();
    if content.is_empty() {
        return None;
    }
    Some(content.replace("\r\n", "\n"))
}
