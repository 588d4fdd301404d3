//! JSON-file registry backend.
//!
//! [`JsonFileRegistry`] keeps no cache: every operation reads the whole
//! record file, and every mutation writes the whole file back. Writes go to
//! a temporary file in the same directory which is then renamed over the
//! target, so readers always see either the old or the new list.
//!
//! Mutations on one instance are serialized behind a mutex. Separate
//! processes sharing the same file are not coordinated; the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use doclib_types::{Category, DocumentRecord, FileReference, Timestamp};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::RegistryResult;
use crate::format;
use crate::ops;
use crate::traits::{Registry, Removal};

/// Registry persisted as one JSON file.
#[derive(Debug)]
pub struct JsonFileRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRegistry {
    /// Open a registry at `path`. The file itself is created on first write;
    /// its parent directory is created now.
    pub fn open(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> RegistryResult<Vec<DocumentRecord>> {
        match fs::read(&self.path) {
            Ok(bytes) => format::decode(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, records: &[DocumentRecord]) -> RegistryResult<()> {
        let bytes = format::encode(records)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), records = records.len(), "record file written");
        Ok(())
    }

    /// Run one read-modify-write cycle under the write lock. The closure
    /// returns the operation result and whether the list changed.
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Vec<DocumentRecord>) -> RegistryResult<(T, bool)>,
    ) -> RegistryResult<T> {
        let _guard = self.write_lock.lock().expect("registry lock poisoned");
        let mut records = self.load()?;
        let (out, changed) = op(&mut records)?;
        if changed {
            self.persist(&records)?;
        }
        Ok(out)
    }
}

impl Registry for JsonFileRegistry {
    fn list(&self) -> RegistryResult<Vec<DocumentRecord>> {
        self.load()
    }

    fn create(
        &self,
        name: &str,
        category: Category,
        file_reference: &FileReference,
        created_at: Timestamp,
    ) -> RegistryResult<DocumentRecord> {
        let record = self.mutate(|records| {
            ops::create(records, name, category, file_reference, created_at).map(|r| (r, true))
        })?;
        info!(file_reference = %record.file_reference, category = %record.category, "document created");
        Ok(record)
    }

    fn rename(
        &self,
        file_reference: &FileReference,
        new_name: &str,
    ) -> RegistryResult<DocumentRecord> {
        let record = self.mutate(|records| {
            ops::rename(records, file_reference, new_name).map(|r| (r, true))
        })?;
        info!(file_reference = %record.file_reference, name = %record.name, "document renamed");
        Ok(record)
    }

    fn remove(&self, file_reference: &FileReference) -> RegistryResult<Removal> {
        let removal = self.mutate(|records| {
            Ok(match ops::remove(records, file_reference) {
                Some(record) => (Removal::Removed(record), true),
                None => (Removal::NotFound, false),
            })
        })?;
        if removal.is_removed() {
            info!(file_reference = %file_reference, "document removed");
        }
        Ok(removal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use std::sync::Arc;

    fn open(dir: &Path) -> JsonFileRegistry {
        JsonFileRegistry::open(dir.join("data").join("documents.json")).unwrap()
    }

    fn create(reg: &JsonFileRegistry, name: &str, category: Category, reference: &str) -> DocumentRecord {
        reg.create(name, category, &FileReference::new(reference), Timestamp::now())
            .unwrap()
    }

    #[test]
    fn missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        assert!(reg.list().unwrap().is_empty());
        assert!(!reg.path().exists());
    }

    #[test]
    fn create_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());

        let before = reg.list().unwrap().len();
        let r = create(&reg, "Manual A", Category::TouchComp, "/uploads/1-a.pdf");
        let after = reg.list().unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last().unwrap(), &r);
        assert_eq!(r.created_at, r.updated_at);
        assert!(reg.path().exists());
    }

    #[test]
    fn reload_yields_identical_list() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        create(&reg, "A", Category::TouchComp, "/uploads/1-a.pdf");
        create(&reg, "B", Category::ProceduresInternal, "/uploads/2-b.pdf");
        create(&reg, "C", Category::TouchComp, "/uploads/3-c.pdf");

        let reopened = open(dir.path());
        assert_eq!(reopened.list().unwrap(), reg.list().unwrap());
    }

    #[test]
    fn rename_advances_updated_at() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        let r = create(&reg, "Manual A", Category::TouchComp, "/uploads/1-a.pdf");

        let renamed = reg.rename(&r.file_reference, "Manual A2").unwrap();
        assert_eq!(renamed.name, "Manual A2");
        assert_eq!(renamed.created_at, r.created_at);
        assert!(renamed.updated_at.unix_millis() > r.updated_at.unix_millis());
        assert_eq!(reg.get(&r.file_reference).unwrap().unwrap(), renamed);
    }

    #[test]
    fn rename_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        let err = reg
            .rename(&FileReference::new("/uploads/none.pdf"), "x")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn rename_to_blank_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        let r = create(&reg, "A", Category::TouchComp, "/uploads/1-a.pdf");
        let err = reg.rename(&r.file_reference, "  ").unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
        assert_eq!(reg.get(&r.file_reference).unwrap().unwrap().name, "A");
    }

    #[test]
    fn remove_existing_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        let a = create(&reg, "A", Category::TouchComp, "/uploads/1-a.pdf");
        create(&reg, "B", Category::TouchComp, "/uploads/2-b.pdf");

        let removal = reg.remove(&a.file_reference).unwrap();
        assert_eq!(removal, Removal::Removed(a.clone()));
        assert!(reg.get(&a.file_reference).unwrap().is_none());

        let bytes_before = fs::read(reg.path()).unwrap();
        assert_eq!(reg.remove(&a.file_reference).unwrap(), Removal::NotFound);
        assert_eq!(fs::read(reg.path()).unwrap(), bytes_before);
        assert_eq!(reg.list().unwrap().len(), 1);
    }

    #[test]
    fn legacy_array_is_read_and_upgraded() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        fs::write(
            reg.path(),
            r#"[{"name":"Old","category":"procedimentosInternos","fileUrl":"/uploads/9-old.pdf",
                 "createdAt":"19/10/2024, 14:03:11","updatedAt":"19/10/2024, 14:03:11"}]"#,
        )
        .unwrap();

        let renamed = reg
            .rename(&FileReference::new("/uploads/9-old.pdf"), "Renamed")
            .unwrap();
        assert_eq!(renamed.created_at.as_str(), "19/10/2024, 14:03:11");
        assert_eq!(renamed.category, Category::ProceduresInternal);

        let value: serde_json::Value = serde_json::from_slice(&fs::read(reg.path()).unwrap()).unwrap();
        assert_eq!(value["version"], crate::FORMAT_VERSION);
        assert_eq!(value["documents"][0]["fileReference"], "/uploads/9-old.pdf");
        assert_eq!(value["documents"][0]["name"], "Renamed");
    }

    #[test]
    fn corrupt_file_is_an_error_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let reg = open(dir.path());
        fs::write(reg.path(), "{broken").unwrap();

        assert!(matches!(reg.list(), Err(RegistryError::Serialization(_))));
        assert!(reg
            .create("A", Category::TouchComp, &FileReference::new("/uploads/1.pdf"), Timestamp::now())
            .is_err());
        assert_eq!(fs::read_to_string(reg.path()).unwrap(), "{broken");
    }

    #[test]
    fn concurrent_creates_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let reg = Arc::new(open(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || {
                    reg.create(
                        &format!("doc {i}"),
                        Category::TouchComp,
                        &FileReference::new(format!("/uploads/{i}-doc.pdf")),
                        Timestamp::now(),
                    )
                    .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(reg.list().unwrap().len(), 8);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn persisted_order_round_trips(names in prop::collection::vec("[A-Za-z0-9 ]{1,16}", 0..12)) {
                let dir = tempfile::tempdir().unwrap();
                let reg = open(dir.path());
                let mut expected = Vec::new();
                for (i, name) in names.iter().enumerate() {
                    if name.trim().is_empty() {
                        continue;
                    }
                    let category = if i % 2 == 0 { Category::TouchComp } else { Category::ProceduresInternal };
                    expected.push(create(&reg, name, category, &format!("/uploads/{i}-d.pdf")));
                }
                prop_assert_eq!(open(dir.path()).list().unwrap(), expected);
            }
        }
    }
}
