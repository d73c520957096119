//! Wiki operations
//!
//! One method per page of the site. Each returns an explicit outcome
//! (page data, redirect target or form to redisplay) and leaves HTTP and
//! HTML concerns to the caller.
//!
//! Add refuses to create an entry whose title already exists, while Edit
//! always overwrites without checking. Both behaviors are intentional.

use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::form::{EntryForm, FormError};
use crate::markdown;
use crate::models::EntryLookup;
use crate::storage::entries::is_valid_name;
use crate::storage::{EntryStore, StorageError};

/// Body shown in place of content when an entry cannot be displayed
pub const PAGE_NOT_FOUND: &str = "Page not found";

/// Errors that abort a wiki operation
#[derive(Error, Debug)]
pub enum WikiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Random was asked for an entry but none exist
    #[error("The encyclopedia has no entries yet")]
    EmptyStore,
}

pub type WikiResult<T> = Result<T, WikiError>;

/// A rendered entry page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPage {
    /// Title as requested
    pub title: String,
    /// Rendered content, or the not-found placeholder
    pub html: String,
    pub found: bool,
}

/// Result of a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query names an entry; go straight to it
    Redirect(String),
    /// Entry names containing the query, in listing order
    Results(Vec<String>),
}

/// Result of submitting the add form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(String),
    Rejected { form: EntryForm, error: FormError },
}

/// Data for the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPage {
    pub title: String,
    pub content: String,
}

/// Result of submitting the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(String),
    Rejected {
        title: String,
        form: EntryForm,
        error: FormError,
    },
}

/// The wiki, backed by an entry store
#[derive(Debug, Clone)]
pub struct Wiki {
    store: EntryStore,
}

impl Wiki {
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// All entry names for the index page
    pub fn list(&self) -> WikiResult<Vec<String>> {
        Ok(self.store.list_entries()?)
    }

    /// Render one entry
    ///
    /// Never fails: a missing or unreadable entry shows the placeholder.
    pub fn view(&self, title: &str) -> EntryPage {
        let lookup = self.store.get_entry(title).unwrap_or_else(|e| {
            warn!("Could not read entry {:?}: {}", title, e);
            EntryLookup::NotFound
        });

        match lookup {
            EntryLookup::Found(entry) => EntryPage {
                title: title.to_string(),
                html: markdown::to_html(&entry.content),
                found: true,
            },
            EntryLookup::NotFound => EntryPage {
                title: title.to_string(),
                html: PAGE_NOT_FOUND.to_string(),
                found: false,
            },
        }
    }

    /// Exact match redirects; otherwise list names containing the query
    pub fn search(&self, query: Option<&str>) -> WikiResult<SearchOutcome> {
        // Blank queries match nothing; others are matched exactly as typed
        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            return Ok(SearchOutcome::Results(Vec::new()));
        };

        if let EntryLookup::Found(entry) = self.store.get_entry(query)? {
            debug!("Search {:?} matched entry {:?}", query, entry.name);
            return Ok(SearchOutcome::Redirect(entry.name));
        }

        let needle = query.to_lowercase();
        let results: Vec<String> = self
            .store
            .list_entries()?
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();

        debug!("Search {:?} found {} partial matches", query, results.len());
        Ok(SearchOutcome::Results(results))
    }

    /// Create a new entry from a submitted form
    pub fn add(&self, form: EntryForm) -> WikiResult<AddOutcome> {
        let entry = match form.validate_new() {
            Ok(entry) => entry,
            Err(error) => return Ok(AddOutcome::Rejected { form, error }),
        };

        if self.store.get_entry(&entry.title)?.is_found() {
            info!("Refusing to overwrite existing entry {:?}", entry.title);
            return Ok(AddOutcome::Rejected {
                form,
                error: FormError::AlreadyExists,
            });
        }

        self.store.save_entry(&entry.title, &entry.content)?;
        Ok(AddOutcome::Created(entry.title))
    }

    /// Prefill the edit form with the entry's current content
    pub fn edit_form(&self, title: &str) -> WikiResult<EditPage> {
        let content = self
            .store
            .get_entry(title)?
            .into_entry()
            .map(|entry| entry.content)
            .unwrap_or_default();

        Ok(EditPage {
            title: title.to_string(),
            content,
        })
    }

    /// Replace an entry's content from a submitted form
    pub fn edit(&self, title: &str, form: EntryForm) -> WikiResult<EditOutcome> {
        let validated = if is_valid_name(title) {
            form.validate_content()
        } else {
            Err(FormError::Invalid)
        };
        let content = match validated {
            Ok(content) => content,
            Err(error) => {
                return Ok(EditOutcome::Rejected {
                    title: title.to_string(),
                    form,
                    error,
                })
            }
        };

        self.store.save_entry(title, &content)?;
        Ok(EditOutcome::Saved(title.to_string()))
    }

    /// Pick an entry uniformly at random
    pub fn random(&self) -> WikiResult<String> {
        self.random_with(&mut rand::rng())
    }

    /// Pick an entry uniformly at random using `rng`
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> WikiResult<String> {
        self.store
            .list_entries()?
            .choose(rng)
            .cloned()
            .ok_or(WikiError::EmptyStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_wiki(temp_dir: &TempDir, entries: &[(&str, &str)]) -> Wiki {
        let store = EntryStore::open(temp_dir.path()).unwrap();
        for (name, content) in entries {
            store.save_entry(name, content).unwrap();
        }
        Wiki::new(store)
    }

    fn stored(wiki: &Wiki, name: &str) -> Option<String> {
        wiki.store()
            .get_entry(name)
            .unwrap()
            .into_entry()
            .map(|entry| entry.content)
    }

    #[test]
    fn test_list() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Git", "g"), ("CSS", "c")]);

        assert_eq!(wiki.list().unwrap(), vec!["CSS", "Git"]);
    }

    #[test]
    fn test_view_renders_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Git", "# Git\n\nA **tool**.")]);

        let page = wiki.view("git");
        assert!(page.found);
        assert_eq!(page.title, "git");
        assert!(page.html.contains("<h1>Git</h1>"));
        assert!(page.html.contains("<strong>tool</strong>"));
    }

    #[test]
    fn test_view_missing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        let page = wiki.view("Nope");
        assert!(!page.found);
        assert_eq!(page.title, "Nope");
        assert_eq!(page.html, PAGE_NOT_FOUND);
    }

    #[test]
    fn test_view_unreadable_entry_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);
        std::fs::write(temp_dir.path().join("Binary.md"), [0xff, 0xfe, 0x00]).unwrap();

        let page = wiki.view("Binary");
        assert!(!page.found);
        assert_eq!(page.html, PAGE_NOT_FOUND);
    }

    #[test]
    fn test_search_substring() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(
            &temp_dir,
            &[("Python", "p"), ("Java", "j"), ("PyTorch", "t")],
        );

        assert_eq!(
            wiki.search(Some("py")).unwrap(),
            SearchOutcome::Results(vec!["PyTorch".to_string(), "Python".to_string()])
        );
    }

    #[test]
    fn test_search_exact_match_redirects() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Python", "p"), ("PyTorch", "t")]);

        for query in ["Python", "python"] {
            assert_eq!(
                wiki.search(Some(query)).unwrap(),
                SearchOutcome::Redirect("Python".to_string())
            );
        }
    }

    #[test]
    fn test_search_without_query() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Python", "p")]);

        assert_eq!(wiki.search(None).unwrap(), SearchOutcome::Results(vec![]));
        assert_eq!(
            wiki.search(Some("  ")).unwrap(),
            SearchOutcome::Results(vec![])
        );
    }

    #[test]
    fn test_search_matches_query_as_typed() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(
            &temp_dir,
            &[("C Sharp", "c"), ("Sharpie", "s"), ("New  York", "n")],
        );

        assert_eq!(
            wiki.search(Some(" Sharp")).unwrap(),
            SearchOutcome::Results(vec!["C Sharp".to_string()])
        );
        assert_eq!(
            wiki.search(Some("w  Y")).unwrap(),
            SearchOutcome::Results(vec!["New  York".to_string()])
        );
    }

    #[test]
    fn test_search_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Python", "p")]);

        assert_eq!(
            wiki.search(Some("haskell")).unwrap(),
            SearchOutcome::Results(vec![])
        );
    }

    #[test]
    fn test_add_creates_entry() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        let outcome = wiki.add(EntryForm::new("Rust", "# Rust")).unwrap();
        assert_eq!(outcome, AddOutcome::Created("Rust".to_string()));
        assert_eq!(stored(&wiki, "rust"), Some("# Rust".to_string()));
    }

    #[test]
    fn test_add_rejects_duplicate_ignoring_case() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("Cats", "a")]);

        let form = EntryForm::new("cats", "something else");
        let outcome = wiki.add(form.clone()).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Rejected {
                form,
                error: FormError::AlreadyExists
            }
        );
        assert_eq!(stored(&wiki, "Cats"), Some("a".to_string()));
        assert_eq!(wiki.list().unwrap(), vec!["Cats"]);
    }

    #[test]
    fn test_add_invalid_form_preserves_input() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        let form = EntryForm::new("Draft", "");
        let outcome = wiki.add(form.clone()).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Rejected {
                form,
                error: FormError::Invalid
            }
        );
        assert!(wiki.list().unwrap().is_empty());
    }

    #[test]
    fn test_edit_form_prefills_content() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("HTML", "markup")]);

        let page = wiki.edit_form("HTML").unwrap();
        assert_eq!(page.title, "HTML");
        assert_eq!(page.content, "markup");

        let missing = wiki.edit_form("Gone").unwrap();
        assert_eq!(missing.content, "");
    }

    #[test]
    fn test_edit_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("HTML", "old")]);

        let outcome = wiki.edit("HTML", EntryForm::new("", "new")).unwrap();
        assert_eq!(outcome, EditOutcome::Saved("HTML".to_string()));
        assert_eq!(stored(&wiki, "HTML"), Some("new".to_string()));
    }

    #[test]
    fn test_edit_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("HTML", "old")]);

        wiki.edit("HTML", EntryForm::new("HTML", "same")).unwrap();
        let once = stored(&wiki, "HTML");
        wiki.edit("HTML", EntryForm::new("HTML", "same")).unwrap();

        assert_eq!(stored(&wiki, "HTML"), once);
        assert_eq!(wiki.list().unwrap(), vec!["HTML"]);
    }

    #[test]
    fn test_edit_creates_missing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        let outcome = wiki.edit("Ghost", EntryForm::new("", "back")).unwrap();
        assert_eq!(outcome, EditOutcome::Saved("Ghost".to_string()));
        assert_eq!(stored(&wiki, "Ghost"), Some("back".to_string()));
    }

    #[test]
    fn test_edit_rejects_blank_content() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[("HTML", "old")]);

        let outcome = wiki.edit("HTML", EntryForm::new("HTML", " ")).unwrap();
        assert!(matches!(
            outcome,
            EditOutcome::Rejected {
                error: FormError::Invalid,
                ..
            }
        ));
        assert_eq!(stored(&wiki, "HTML"), Some("old".to_string()));
    }

    #[test]
    fn test_edit_unstorable_title_is_invalid_form() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        let outcome = wiki.edit(".profile", EntryForm::new("", "content")).unwrap();
        assert!(matches!(
            outcome,
            EditOutcome::Rejected {
                error: FormError::Invalid,
                ..
            }
        ));
        assert!(wiki.list().unwrap().is_empty());
    }

    #[test]
    fn test_random_only_returns_stored_names() {
        let temp_dir = TempDir::new().unwrap();
        let names = ["CSS", "Django", "Git", "HTML", "Python"];
        let entries: Vec<_> = names.iter().map(|n| (*n, "content")).collect();
        let wiki = test_wiki(&temp_dir, &entries);

        for _ in 0..50 {
            let picked = wiki.random().unwrap();
            assert!(names.contains(&picked.as_str()), "unexpected {picked}");
        }
    }

    #[test]
    fn test_random_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let wiki = test_wiki(&temp_dir, &[]);

        assert!(matches!(wiki.random(), Err(WikiError::EmptyStore)));
    }
}
