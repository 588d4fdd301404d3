use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use doclib_types::FileReference;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::naming::{
    MAX_NAME_ATTEMPTS, ReferenceScheme, sanitize_original_name, stored_name, unix_millis_now,
};
use crate::traits::BlobStore;

/// Blob store backed by one flat directory on local disk.
#[derive(Debug)]
pub struct FsBlobStore {
    root: PathBuf,
    scheme: ReferenceScheme,
}

impl FsBlobStore {
    /// Open (or create) a store rooted at `root`, serving references under
    /// `url_prefix`.
    pub fn open(root: impl Into<PathBuf>, url_prefix: &str) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            scheme: ReferenceScheme::new(url_prefix),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scheme(&self) -> &ReferenceScheme {
        &self.scheme
    }

    /// Absolute path of the blob a reference points to.
    pub fn path_of(&self, reference: &FileReference) -> StoreResult<PathBuf> {
        Ok(self.root.join(self.scheme.stored_name(reference)?))
    }

    fn write_new(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let written = file.write_all(content).and_then(|()| file.sync_all());
        if let Err(e) = written {
            // Leave no half-written blob behind.
            let _ = fs::remove_file(path);
            return Err(e);
        }
        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    fn save(&self, content: &[u8], original_name: &str) -> StoreResult<FileReference> {
        let original = sanitize_original_name(original_name)?;
        let mut millis = unix_millis_now();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = stored_name(millis, &original);
            let path = self.root.join(&name);
            match self.write_new(&path, content) {
                Ok(()) => {
                    debug!(path = %path.display(), size = content.len(), "blob written");
                    return Ok(self.scheme.reference(&name));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => millis += 1,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::NameExhausted(original))
    }

    fn read(&self, reference: &FileReference) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_of(reference)?) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, reference: &FileReference) -> StoreResult<bool> {
        Ok(self.path_of(reference)?.is_file())
    }

    fn delete(&self, reference: &FileReference) -> StoreResult<bool> {
        let path = self.path_of(reference)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "blob deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn references(&self) -> StoreResult<Vec<FileReference>> {
        let mut refs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => refs.push(self.scheme.reference(&name)),
                Err(name) => warn!(?name, "skipping non UTF-8 file in upload directory"),
            }
        }
        refs.sort();
        Ok(refs)
    }
}
