//! On-disk layout of the record file.
//!
//! ```text
//! {"version": 1, "documents": [ {name, category, fileReference, createdAt, updatedAt}, ... ]}
//! ```
//!
//! Files written before versioning are a bare JSON array of records. They
//! are still read; the next write upgrades them to the versioned layout.

use doclib_types::DocumentRecord;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Current record file version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct VersionedOut<'a> {
    version: u32,
    documents: &'a [DocumentRecord],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocuments {
    Versioned {
        version: u32,
        documents: Vec<DocumentRecord>,
    },
    Legacy(Vec<DocumentRecord>),
}

/// Decode a record file. Empty (or whitespace-only) input is an empty list.
pub fn decode(bytes: &[u8]) -> RegistryResult<Vec<DocumentRecord>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let stored: StoredDocuments = serde_json::from_slice(bytes)
        .map_err(|e| RegistryError::Serialization(e.to_string()))?;
    match stored {
        StoredDocuments::Versioned { version, documents } => {
            if version > FORMAT_VERSION {
                return Err(RegistryError::UnsupportedVersion(version));
            }
            Ok(documents)
        }
        StoredDocuments::Legacy(documents) => Ok(documents),
    }
}

/// Encode records in the current versioned layout.
pub fn encode(records: &[DocumentRecord]) -> RegistryResult<Vec<u8>> {
    let out = VersionedOut {
        version: FORMAT_VERSION,
        documents: records,
    };
    let mut bytes = serde_json::to_vec_pretty(&out)
        .map_err(|e| RegistryError::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclib_types::{Category, FileReference, Timestamp};

    #[test]
    fn empty_input_is_empty_list() {
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"  \n").unwrap().is_empty());
        assert!(decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn decodes_legacy_array() {
        let json = br#"[
            {"name":"A","category":"touchComp","fileUrl":"/uploads/1-a.pdf",
             "createdAt":"01/02/2024 10:00:00","updatedAt":"01/02/2024 10:00:00"}
        ]"#;
        let records = decode(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_reference.as_str(), "/uploads/1-a.pdf");
        assert_eq!(records[0].created_at.as_str(), "01/02/2024 10:00:00");
    }

    #[test]
    fn encode_writes_version() {
        let records = vec![DocumentRecord::new(
            "A",
            Category::ProceduresInternal,
            FileReference::new("/uploads/1-a.pdf"),
            Timestamp::from_raw("2024-06-01T12:30:00.000Z"),
        )];
        let bytes = encode(&records).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["documents"][0]["category"], "proceduresInternal");
        assert_eq!(decode(&bytes).unwrap(), records);
    }

    #[test]
    fn rejects_future_version() {
        let err = decode(br#"{"version": 99, "documents": []}"#).unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedVersion(99)));
    }

    #[test]
    fn rejects_garbage() {
        let err = decode(b"{not json").unwrap_err();
        assert!(matches!(err, RegistryError::Serialization(_)));
    }
}
