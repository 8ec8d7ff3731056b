//! Grouping key component validation.
//!
//! Every component of a [`GroupingKey`] becomes exactly one directory (or,
//! for the leaf, file) name below the link root. Valid components:
//! - Must be non-empty
//! - Must not contain `/`, `\` or NUL
//! - Must not be `.` or `..`
//!
//! Dots, spaces and other punctuation are otherwise allowed: DICOM UIDs such
//! as `1.2.840.10008.5.1.4.1.1.2` are typical components.

use std::path::PathBuf;

use slink_types::{GroupingKey, KeyField};

use crate::error::{LinkError, LinkResult};

/// Characters that are forbidden anywhere in a component.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// Validate a single grouping key component.
///
/// # Examples
///
/// ```
/// use slink_index::names::validate_component;
/// use slink_types::KeyField;
///
/// assert!(validate_component(KeyField::Level2, "1.2.840.113619.2.55").is_ok());
/// assert!(validate_component(KeyField::Level2, "").is_err());
/// assert!(validate_component(KeyField::Level2, "../etc").is_err());
/// ```
pub fn validate_component(field: KeyField, value: &str) -> LinkResult<()> {
    if value.is_empty() {
        return Err(LinkError::IncompleteMetadata { field });
    }

    for ch in FORBIDDEN_CHARS {
        if value.contains(*ch) {
            return Err(LinkError::InvalidComponent {
                field,
                value: value.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if value == "." || value == ".." {
        return Err(LinkError::InvalidComponent {
            field,
            value: value.to_string(),
            reason: "must not be a relative path segment".into(),
        });
    }

    Ok(())
}

/// Validate a whole key.
///
/// Missing components are reported before malformed ones, so a key with an
/// empty field always yields `IncompleteMetadata`.
pub fn validate_key(key: &GroupingKey) -> LinkResult<()> {
    if let Some(field) = key.first_missing() {
        return Err(LinkError::IncompleteMetadata { field });
    }
    for (field, value) in key.components() {
        validate_component(field, value)?;
    }
    Ok(())
}

/// Path of the entry for `key`, relative to the link root.
pub fn relative_link_path(key: &GroupingKey) -> LinkResult<PathBuf> {
    validate_key(key)?;
    Ok(key.components().iter().map(|(_, value)| *value).collect())
}
