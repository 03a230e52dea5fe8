//! Persistence of indicator books
//!
//! A project is stored as one [`IndicatorBook`]. The engine only needs to load
//! and save whole books, so the trait stays small and backends are free to
//! choose their format.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::IndicatorBook;

/// Storage format version written by [`JsonFileRepository`]
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised by a repository backend
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid project name: {0}")]
    InvalidProject(String),

    #[error("Invalid book: {0}")]
    InvalidBook(#[from] crate::Error),
}

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Load and save indicator books by project id
pub trait WorksheetRepository {
    /// Load a project. `Ok(None)` if it was never saved.
    fn load(&self, project: &str) -> RepositoryResult<Option<IndicatorBook>>;

    /// Save a project, replacing any earlier state
    fn save(&mut self, project: &str, book: &IndicatorBook) -> RepositoryResult<()>;

    /// Delete a project. Returns whether anything was removed.
    fn remove(&mut self, project: &str) -> RepositoryResult<bool>;
}

#[derive(Serialize)]
struct StoredBookRef<'a> {
    version: u32,
    book: &'a IndicatorBook,
}

#[derive(Deserialize)]
struct StoredBook {
    version: u32,
    book: IndicatorBook,
}

/// Stores each project as pretty-printed JSON in `<dir>/<project>.json`
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository rooted at `dir`. The directory is created on first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the repository
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds a project
    pub fn project_path(&self, project: &str) -> RepositoryResult<PathBuf> {
        let valid = !project.is_empty()
            && project != "."
            && project != ".."
            && !project.contains(['/', '\\']);
        if !valid {
            return Err(RepositoryError::InvalidProject(project.into()));
        }
        Ok(self.dir.join(format!("{}.json", project)))
    }
}

impl WorksheetRepository for JsonFileRepository {
    fn load(&self, project: &str) -> RepositoryResult<Option<IndicatorBook>> {
        let path = self.project_path(project)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredBook = serde_json::from_str(&text)?;
        if stored.version != FORMAT_VERSION {
            return Err(RepositoryError::UnsupportedVersion(stored.version));
        }
        stored.book.validate()?;
        log::debug!("loaded project '{}' from {}", project, path.display());
        Ok(Some(stored.book))
    }

    fn save(&mut self, project: &str, book: &IndicatorBook) -> RepositoryResult<()> {
        let path = self.project_path(project)?;
        fs::create_dir_all(&self.dir)?;

        let stored = StoredBookRef {
            version: FORMAT_VERSION,
            book,
        };
        let json = serde_json::to_string_pretty(&stored)?;

        // write next to the target, then rename, so a failed save keeps the old file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        log::debug!("saved project '{}' to {}", project, path.display());
        Ok(())
    }

    fn remove(&mut self, project: &str) -> RepositoryResult<bool> {
        let path = self.project_path(project)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory repository, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    books: HashMap<String, IndicatorBook>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl WorksheetRepository for MemoryRepository {
    fn load(&self, project: &str) -> RepositoryResult<Option<IndicatorBook>> {
        Ok(self.books.get(project).cloned())
    }

    fn save(&mut self, project: &str, book: &IndicatorBook) -> RepositoryResult<()> {
        self.books.insert(project.to_string(), book.clone());
        Ok(())
    }

    fn remove(&mut self, project: &str) -> RepositoryResult<bool> {
        Ok(self.books.remove(project).is_some())
    }
}

/// Load a project, or create a book with a single default view
pub fn load_or_default<R: WorksheetRepository + ?Sized>(
    repo: &R,
    project: &str,
    default_view: &str,
) -> RepositoryResult<IndicatorBook> {
    if let Some(book) = repo.load(project)? {
        if !book.is_empty() {
            return Ok(book);
        }
    }

    let mut book = IndicatorBook::new();
    // blank default names fall back to a generic one
    if book.add_view(default_view).is_err() {
        book.add_view("方案1")?;
    }
    Ok(book)
}
