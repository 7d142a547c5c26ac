use derive_builder::Builder;
use std::{
    borrow::Cow,
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::store::{ContentStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::File => write!(f, "file"),
            ItemKind::Directory => write!(f, "directory"),
        }
    }
}

/// Where the contents of a file come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Empty,
    Inline(Vec<u8>),
    /// Reference into a [`ContentStore`].
    Template(String),
}

/// Description of one file or directory to create.
///
/// Directories ignore `extension` and `source`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct Item {
    name: String,
    #[builder(default, setter(into, strip_option))]
    extension: Option<String>,
    kind: ItemKind,
    creation_path: PathBuf,
    #[builder(default)]
    source: Source,
}

impl Item {
    /// Create a new [`ItemBuilder`]
    #[must_use]
    pub fn builder() -> ItemBuilder {
        ItemBuilder::create_empty()
    }

    /// Builder for a file named `name` inside `creation_path`.
    pub fn file(name: impl Into<String>, creation_path: impl Into<PathBuf>) -> ItemBuilder {
        let mut builder = Self::builder();
        builder
            .name(name)
            .kind(ItemKind::File)
            .creation_path(creation_path);
        builder
    }

    /// Builder for a directory named `name` inside `creation_path`.
    pub fn directory(name: impl Into<String>, creation_path: impl Into<PathBuf>) -> ItemBuilder {
        let mut builder = Self::builder();
        builder
            .name(name)
            .kind(ItemKind::Directory)
            .creation_path(creation_path);
        builder
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// File name with the extension appended, a leading `.` is added when missing.
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        match self.extension.as_deref() {
            None | Some("") => Cow::Borrowed(self.name.as_str()),
            Some(ext) if ext.starts_with('.') => Cow::Owned(format!("{}{ext}", self.name)),
            Some(ext) => Cow::Owned(format!("{}.{ext}", self.name)),
        }
    }

    /// Full path of the entry this item creates.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        match self.kind {
            ItemKind::Directory => self.creation_path.join(&self.name),
            ItemKind::File => self.creation_path.join(self.file_name().as_ref()),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid item type for {name}: expected {expected}, found {found}")]
    InvalidKind {
        name: String,
        expected: ItemKind,
        found: ItemKind,
    },
    #[error("failed to get content from template {reference}: {source}")]
    Template {
        reference: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to create item {name} at {}: {source}", path.display())]
    Creation {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Filesystem operations the generator needs.
pub trait Filesystem {
    /// Creates `path` and every missing ancestor.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;
    /// Creates or truncates `path` and writes `contents` to it.
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Disk;

impl Filesystem for Disk {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateDir(PathBuf),
    Write { path: PathBuf, size: usize },
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::CreateDir(path) => write!(f, "mkdir {}", path.display()),
            Operation::Write { path, size } => write!(f, "write {} ({size} bytes)", path.display()),
        }
    }
}

/// Records operations instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct DryRun {
    pub operations: Vec<Operation>,
}

impl Filesystem for DryRun {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.operations.push(Operation::CreateDir(path.to_owned()));
        Ok(())
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.operations.push(Operation::Write {
            path: path.to_owned(),
            size: contents.len(),
        });
        Ok(())
    }
}

/// Failures of one [`Generator::create_items`] call, in item order.
#[derive(Debug, Default)]
pub struct Report {
    failures: Vec<GenerationError>,
}

impl Report {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[GenerationError] {
        &self.failures
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<GenerationError> {
        self.failures
    }
}

impl IntoIterator for Report {
    type Item = GenerationError;
    type IntoIter = std::vec::IntoIter<GenerationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

/// Turns [`Item`]s into directories and files.
pub struct Generator<S, F = Disk> {
    store: S,
    fs: F,
}

impl<S: ContentStore> Generator<S, Disk> {
    pub fn new(store: S) -> Self {
        Generator { store, fs: Disk }
    }
}

impl<S: ContentStore, F: Filesystem> Generator<S, F> {
    pub fn with_filesystem(store: S, fs: F) -> Self {
        Generator { store, fs }
    }

    #[must_use]
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    #[must_use]
    pub fn into_filesystem(self) -> F {
        self.fs
    }

    /// Creates every item, in order, without stopping at failures.
    pub fn create_items<'i, I>(&mut self, items: I) -> Report
    where
        I: IntoIterator<Item = &'i Item>,
    {
        let failures = items
            .into_iter()
            .filter_map(|item| self.create_item(item).err())
            .collect();

        Report { failures }
    }

    /// # Errors
    ///
    /// See [`Generator::create_directory`] and [`Generator::create_file`].
    pub fn create_item(&mut self, item: &Item) -> Result<(), GenerationError> {
        match item.kind {
            ItemKind::Directory => self.create_directory(item),
            ItemKind::File => self.create_file(item),
        }
    }

    /// Creates the directory of `item` along with missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidKind`] for a file item and
    /// [`GenerationError::Creation`] if the filesystem refuses.
    pub fn create_directory(&mut self, item: &Item) -> Result<(), GenerationError> {
        expect_kind(item, ItemKind::Directory)?;

        let path = item.path();
        self.fs
            .create_dir_all(&path)
            .map_err(|source| GenerationError::Creation {
                name: item.name.clone(),
                path: path.clone(),
                source,
            })?;

        crate::trace!("Created directory {}", path.display());
        Ok(())
    }

    /// Writes the file of `item`.
    ///
    /// Inline contents are written as they are, a template reference is looked up in the
    /// store, and a file without either is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidKind`] for a directory item,
    /// [`GenerationError::Template`] when the template lookup fails and
    /// [`GenerationError::Creation`] when the write fails.
    pub fn create_file(&mut self, item: &Item) -> Result<(), GenerationError> {
        expect_kind(item, ItemKind::File)?;

        let contents: Cow<'_, [u8]> = match &item.source {
            Source::Inline(bytes) => Cow::Borrowed(bytes.as_slice()),
            Source::Template(reference) => {
                self.store
                    .lookup(reference)
                    .map_err(|source| GenerationError::Template {
                        reference: reference.clone(),
                        source,
                    })?
            }
            Source::Empty => Cow::Borrowed(&[][..]),
        };

        let path = item.path();
        self.fs
            .write(&path, &contents)
            .map_err(|source| GenerationError::Creation {
                name: item.name.clone(),
                path: path.clone(),
                source,
            })?;

        crate::trace!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

fn expect_kind(item: &Item, expected: ItemKind) -> Result<(), GenerationError> {
    if item.kind == expected {
        Ok(())
    } else {
        Err(GenerationError::InvalidKind {
            name: item.name.clone(),
            expected,
            found: item.kind,
        })
    }
}
