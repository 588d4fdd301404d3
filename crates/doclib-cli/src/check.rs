use std::collections::{BTreeMap, BTreeSet};

use doclib_registry::Registry;
use doclib_store::{BlobStore, StoreError};
use doclib_types::FileReference;
use serde::Serialize;

/// Differences between the record file and the upload directory.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub records: usize,
    pub blobs: usize,
    /// References registered more than once.
    pub duplicate_references: Vec<FileReference>,
    /// Records whose file is gone.
    pub missing_blobs: Vec<FileReference>,
    /// Files no record points at.
    pub orphan_blobs: Vec<FileReference>,
}

impl IntegrityReport {
    pub fn problem_count(&self) -> usize {
        self.duplicate_references.len() + self.missing_blobs.len() + self.orphan_blobs.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

pub fn check(registry: &dyn Registry, blobs: &dyn BlobStore) -> anyhow::Result<IntegrityReport> {
    let records = registry.list()?;
    let stored: BTreeSet<FileReference> = blobs.references()?.into_iter().collect();

    let mut seen: BTreeMap<&FileReference, usize> = BTreeMap::new();
    for record in &records {
        *seen.entry(&record.file_reference).or_default() += 1;
    }

    let mut report = IntegrityReport {
        records: records.len(),
        blobs: stored.len(),
        ..IntegrityReport::default()
    };
    for (reference, count) in &seen {
        if *count > 1 {
            report.duplicate_references.push((*reference).clone());
        }
        match blobs.exists(reference) {
            Ok(true) => {}
            // A reference outside the upload prefix cannot have a file here.
            Ok(false) | Err(StoreError::InvalidReference(_)) => {
                report.missing_blobs.push((*reference).clone());
            }
            Err(e) => return Err(e.into()),
        }
    }
    report.orphan_blobs = stored
        .into_iter()
        .filter(|r| !seen.contains_key(r))
        .collect();
    Ok(report)
}
