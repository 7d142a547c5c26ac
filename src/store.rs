use include_dir::{include_dir, Dir};
use std::{
    borrow::Cow,
    collections::HashMap,
    io,
    path::PathBuf,
};
use thiserror::Error;

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/embedded");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no template named {0}")]
    NotFound(String),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of template bytes, addressed by a reference such as `license/mit.txt`.
pub trait ContentStore {
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when nothing is stored under `reference`, or
    /// [`StoreError::Read`] when the backing storage fails.
    fn lookup(&self, reference: &str) -> Result<Cow<'_, [u8]>, StoreError>;
}

/// Templates compiled into the binary from the `embedded/` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bundled;

impl Bundled {
    /// Every reference the bundle can resolve.
    pub fn references(&self) -> impl Iterator<Item = &'static str> {
        fn walk(dir: &'static Dir<'static>, out: &mut Vec<&'static str>) {
            for file in dir.files() {
                if let Some(path) = file.path().to_str() {
                    out.push(path);
                }
            }
            for sub in dir.dirs() {
                walk(sub, out);
            }
        }

        let mut refs = Vec::new();
        walk(&BUNDLED, &mut refs);
        refs.into_iter()
    }
}

impl ContentStore for Bundled {
    fn lookup(&self, reference: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        BUNDLED
            .get_file(reference)
            .map(|file| Cow::Borrowed(file.contents()))
            .ok_or_else(|| StoreError::NotFound(reference.to_owned()))
    }
}

/// Templates read from a directory on disk, references are relative to `root`.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore { root: root.into() }
    }
}

impl ContentStore for DirStore {
    fn lookup(&self, reference: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        let path = self.root.join(reference);

        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(reference.to_owned()))
            }
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }
}

impl ContentStore for HashMap<String, Vec<u8>> {
    fn lookup(&self, reference: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        self.get(reference)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| StoreError::NotFound(reference.to_owned()))
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn lookup(&self, reference: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        (**self).lookup(reference)
    }
}
