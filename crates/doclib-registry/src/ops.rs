//! Record-list mutations shared by every registry backend.
//!
//! Backends load the full list, call one of these, and persist the result
//! when the returned flag says the list changed.

use doclib_types::{Category, DocumentRecord, FileReference, Timestamp, TypeError};
use tracing::warn;

use crate::error::{RegistryError, RegistryResult};

/// Position of the first record carrying `reference`.
///
/// A well-formed list holds each reference once. If the list has been
/// corrupted with duplicates, the first match wins and the condition is
/// logged.
pub(crate) fn find_index(records: &[DocumentRecord], reference: &FileReference) -> Option<usize> {
    let mut matches = records
        .iter()
        .enumerate()
        .filter(|(_, r)| &r.file_reference == reference)
        .map(|(i, _)| i);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        warn!(
            file_reference = %reference,
            occurrences = extra + 1,
            "data integrity: reference registered more than once; using first match"
        );
    }
    Some(first)
}

fn non_blank(value: &str, field: &'static str) -> RegistryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeError::EmptyField { field }.into());
    }
    Ok(trimmed.to_string())
}

pub(crate) fn create(
    records: &mut Vec<DocumentRecord>,
    name: &str,
    category: Category,
    file_reference: &FileReference,
    created_at: Timestamp,
) -> RegistryResult<DocumentRecord> {
    let name = non_blank(name, "name")?;
    if file_reference.is_empty() {
        return Err(TypeError::EmptyField {
            field: "fileReference",
        }
        .into());
    }
    if created_at.is_empty() {
        return Err(TypeError::EmptyField { field: "createdAt" }.into());
    }
    if records.iter().any(|r| &r.file_reference == file_reference) {
        return Err(RegistryError::Validation(format!(
            "fileReference already registered: {file_reference}"
        )));
    }

    let record = DocumentRecord::new(name, category, file_reference.clone(), created_at);
    records.push(record.clone());
    Ok(record)
}

pub(crate) fn rename(
    records: &mut [DocumentRecord],
    file_reference: &FileReference,
    new_name: &str,
) -> RegistryResult<DocumentRecord> {
    let new_name = non_blank(new_name, "newName")?;
    let index = find_index(records, file_reference)
        .ok_or_else(|| RegistryError::NotFound(file_reference.clone()))?;
    let record = &mut records[index];
    record.rename(new_name);
    Ok(record.clone())
}

pub(crate) fn remove(
    records: &mut Vec<DocumentRecord>,
    file_reference: &FileReference,
) -> Option<DocumentRecord> {
    find_index(records, file_reference).map(|i| records.remove(i))
}
