//! Metadata resolution: from a host instance identifier to the blob it was
//! stored as and the grouping key it should be linked under.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use slink_types::{BlobId, GroupingKey};

/// Errors raised by a [`MetadataResolver`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown instance: {0}")]
    UnknownInstance(String),

    #[error("malformed metadata for instance {instance}: {reason}")]
    Malformed { instance: String, reason: String },
}

/// Outcome of resolving an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Every field was found.
    Complete { blob_id: BlobId, key: GroupingKey },
    /// At least one field could not be resolved; linking should be skipped.
    Incomplete { missing: Vec<&'static str> },
}

/// Supplies the blob identifier and grouping key of a stored instance.
pub trait MetadataResolver: Send + Sync {
    fn resolve(&self, instance_id: &str) -> Result<Resolution, ResolveError>;
}

/// DICOM tags that make up a grouping key, in path order.
const KEY_TAGS: [(&str, &str); 4] = [
    ("0010,0020", "PatientID"),
    ("0020,000D", "StudyInstanceUID"),
    ("0020,000E", "SeriesInstanceUID"),
    ("0008,0018", "SOPInstanceUID"),
];

/// Extract a grouping key from a DICOM JSON document.
///
/// Reads PatientID / StudyInstanceUID / SeriesInstanceUID / SOPInstanceUID
/// from `doc["<tag>"]["Value"]`. Tags match case-insensitively, and the value
/// may be a plain string or an array whose first element is a string or
/// number. On failure returns the names of every tag that was absent or
/// empty.
pub fn key_from_dicom_json(doc: &Value) -> Result<GroupingKey, Vec<&'static str>> {
    let mut values: [String; 4] = Default::default();
    let mut missing = Vec::new();

    for (slot, (tag, name)) in values.iter_mut().zip(KEY_TAGS) {
        match lookup_tag(doc, tag).and_then(tag_value) {
            Some(value) if !value.is_empty() => *slot = value,
            _ => missing.push(name),
        }
    }

    if !missing.is_empty() {
        return Err(missing);
    }

    let [level1, level2, level3, leaf] = values;
    Ok(GroupingKey::new(level1, level2, level3, leaf))
}

fn lookup_tag<'a>(doc: &'a Value, tag: &str) -> Option<&'a Value> {
    doc.as_object()?
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(tag))
        .map(|(_, v)| v)
}

fn tag_value(element: &Value) -> Option<String> {
    let value = element.get("Value")?;
    let first = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match first {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// In-process resolver over DICOM JSON documents registered by the host.
#[derive(Default)]
pub struct DicomJsonResolver {
    instances: RwLock<HashMap<String, (BlobId, Value)>>,
}

impl DicomJsonResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the blob and metadata document of an instance.
    pub fn insert(&self, instance_id: impl Into<String>, blob_id: BlobId, doc: Value) {
        self.instances
            .write()
            .expect("lock poisoned")
            .insert(instance_id.into(), (blob_id, doc));
    }

    /// Forget an instance. Returns `true` if it was registered.
    pub fn remove(&self, instance_id: &str) -> bool {
        self.instances
            .write()
            .expect("lock poisoned")
            .remove(instance_id)
            .is_some()
    }
}

impl MetadataResolver for DicomJsonResolver {
    fn resolve(&self, instance_id: &str) -> Result<Resolution, ResolveError> {
        let map = self.instances.read().expect("lock poisoned");
        let (blob_id, doc) = map
            .get(instance_id)
            .ok_or_else(|| ResolveError::UnknownInstance(instance_id.to_string()))?;

        if !doc.is_object() {
            return Err(ResolveError::Malformed {
                instance: instance_id.to_string(),
                reason: "metadata document is not a JSON object".into(),
            });
        }

        Ok(match key_from_dicom_json(doc) {
            Ok(key) => Resolution::Complete {
                blob_id: blob_id.clone(),
                key,
            },
            Err(missing) => Resolution::Incomplete { missing },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_doc() -> Value {
        json!({
            "0010,0020": { "vr": "LO", "Value": ["PAT1"] },
            "0020,000d": { "vr": "UI", "Value": ["STU1"] },
            "0020,000e": { "vr": "UI", "Value": ["SER1"] },
            "0008,0018": { "vr": "UI", "Value": ["SOP1"] }
        })
    }

    #[test]
    fn extracts_key_from_array_values() {
        let key = key_from_dicom_json(&full_doc()).unwrap();
        assert_eq!(key, GroupingKey::new("PAT1", "STU1", "SER1", "SOP1"));
    }

    #[test]
    fn accepts_plain_string_and_numeric_values() {
        let doc = json!({
            "0010,0020": { "Value": 12345 },
            "0020,000D": { "Value": "STU1" },
            "0020,000E": { "Value": ["SER1"] },
            "0008,0018": { "Value": [" SOP1 "] }
        });
        let key = key_from_dicom_json(&doc).unwrap();
        assert_eq!(key, GroupingKey::new("12345", "STU1", "SER1", "SOP1"));
    }

    #[test]
    fn reports_every_missing_tag() {
        let doc = json!({
            "0010,0020": { "Value": ["PAT1"] },
            "0020,000E": { "Value": [] },
            "0008,0018": { "vr": "UI" }
        });
        let missing = key_from_dicom_json(&doc).unwrap_err();
        assert_eq!(
            missing,
            vec!["StudyInstanceUID", "SeriesInstanceUID", "SOPInstanceUID"]
        );
    }

    #[test]
    fn empty_value_is_missing() {
        let mut doc = full_doc();
        doc["0020,000d"]["Value"] = json!([""]);
        assert_eq!(key_from_dicom_json(&doc).unwrap_err(), vec!["StudyInstanceUID"]);
    }

    #[test]
    fn resolver_complete() {
        let resolver = DicomJsonResolver::new();
        let blob = BlobId::parse("ab12cd34ef56").unwrap();
        resolver.insert("inst-1", blob.clone(), full_doc());

        assert_eq!(
            resolver.resolve("inst-1").unwrap(),
            Resolution::Complete {
                blob_id: blob,
                key: GroupingKey::new("PAT1", "STU1", "SER1", "SOP1"),
            }
        );
    }

    #[test]
    fn resolver_incomplete() {
        let resolver = DicomJsonResolver::new();
        let blob = BlobId::parse("ab12cd34ef56").unwrap();
        resolver.insert("inst-1", blob, json!({ "0010,0020": { "Value": ["PAT1"] } }));

        match resolver.resolve("inst-1").unwrap() {
            Resolution::Incomplete { missing } => assert_eq!(missing.len(), 3),
            other => panic!("expected incomplete, got {other:?}"),
        }
    }

    #[test]
    fn resolver_unknown_and_malformed() {
        let resolver = DicomJsonResolver::new();
        assert!(matches!(
            resolver.resolve("nope"),
            Err(ResolveError::UnknownInstance(_))
        ));

        resolver.insert("inst-2", BlobId::parse("ab12cd34").unwrap(), json!([1, 2]));
        assert!(matches!(
            resolver.resolve("inst-2"),
            Err(ResolveError::Malformed { .. })
        ));

        assert!(resolver.remove("inst-2"));
        assert!(!resolver.remove("inst-2"));
    }
}
