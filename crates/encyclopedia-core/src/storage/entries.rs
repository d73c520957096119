//! Flat-file entry store
//!
//! Each entry is a UTF-8 markdown file named `<name>.md` inside a single
//! root directory. Lookups compare names ignoring case against the directory
//! listing, so the stored file keeps the case it was created with.
//!
//! Writes are atomic (write to a uniquely named hidden temp file, then
//! rename) so a reader never sees a partially-written entry. Concurrent
//! writers to one name each use their own temp file; the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{debug, info};

use super::error::{StorageError, StorageResult};
use crate::models::{Entry, EntryLookup};

/// File extension used for entry files
pub const ENTRY_EXTENSION: &str = "md";

/// Flat-file store mapping entry names to markdown content
#[derive(Debug, Clone)]
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|source| StorageError::CreateDirectory {
                path: root.clone(),
                source,
            })?;
            info!("Created entries directory {:?}", root);
        }
        Ok(Self { root })
    }

    /// Directory holding the entry files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all entry names, sorted
    pub fn list_entries(&self) -> StorageResult<Vec<String>> {
        let dir = fs::read_dir(&self.root)
            .map_err(|e| StorageError::from_read(e, self.root.clone()))?;

        let mut names = Vec::new();
        for item in dir {
            let path = item?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().map_or(true, |ext| ext != ENTRY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_name(stem) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Look up an entry by name, ignoring case
    pub fn get_entry(&self, name: &str) -> StorageResult<EntryLookup> {
        let Some(canonical) = self.canonical_name(name)? else {
            debug!("No entry named {:?}", name);
            return Ok(EntryLookup::NotFound);
        };

        let path = self.entry_path(&canonical);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(EntryLookup::Found(Entry::new(canonical, content))),
            // Removed between listing and reading
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntryLookup::NotFound),
            Err(e) => Err(StorageError::from_read(e, path)),
        }
    }

    /// Check whether an entry exists, ignoring case
    pub fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.canonical_name(name)?.is_some())
    }

    /// Write `content` under `name`, replacing any existing content
    ///
    /// If an entry already exists under a name that differs only in case,
    /// that entry's file is overwritten and its stored name is kept.
    pub fn save_entry(&self, name: &str, content: &str) -> StorageResult<()> {
        if !is_valid_name(name) {
            return Err(StorageError::InvalidName {
                name: name.to_string(),
            });
        }

        let canonical = self
            .canonical_name(name)?
            .unwrap_or_else(|| name.to_string());
        let path = self.entry_path(&canonical);
        let temp_prefix = format!(".{}.{}.", canonical, ENTRY_EXTENSION);

        atomic_write(&self.root, &temp_prefix, &path, content.as_bytes())?;
        info!("Saved entry {:?} ({} bytes)", canonical, content.len());
        Ok(())
    }

    /// Resolve `name` to the stored name of the matching entry, if any
    fn canonical_name(&self, name: &str) -> StorageResult<Option<String>> {
        let wanted = name.to_lowercase();
        Ok(self
            .list_entries()?
            .into_iter()
            .find(|existing| existing.to_lowercase() == wanted))
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, ENTRY_EXTENSION))
    }
}

/// Whether `name` can be stored as a single file inside the root
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

/// Write data to `path` atomically via a fresh temp file in `dir`
///
/// 1. Create a uniquely named temp file (`<prefix><random>.tmp`) in `dir`
/// 2. Write and sync it to disk
/// 3. Rename it over the target path
fn atomic_write(dir: &Path, prefix: &str, path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = Builder::new()
        .prefix(prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StorageError::from_write(e, dir.to_path_buf()))?;
    let temp_path = file.path().to_path_buf();

    file.write_all(data)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;

    // On failure the temp file is removed when the returned handle drops
    file.persist(path)
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path,
            to: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}
