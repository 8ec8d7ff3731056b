use std::fmt;

use serde::{Deserialize, Serialize};

/// One component of a [`GroupingKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    Level1,
    Level2,
    Level3,
    Leaf,
}

impl KeyField {
    /// All fields in path order.
    pub const ALL: [KeyField; 4] = [Self::Level1, Self::Level2, Self::Level3, Self::Leaf];
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level1 => write!(f, "level1"),
            Self::Level2 => write!(f, "level2"),
            Self::Level3 => write!(f, "level3"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}

/// Hierarchical key under which a blob is mirrored in the link index.
///
/// Three grouping levels (patient / study / series for imaging data) followed
/// by a leaf identifier. The link for a key lives at
/// `link_root/level1/level2/level3/leaf`.
///
/// A key may be built with empty components; it is the link index that
/// refuses to act on an incomplete key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupingKey {
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub leaf: String,
}

impl GroupingKey {
    pub fn new(
        level1: impl Into<String>,
        level2: impl Into<String>,
        level3: impl Into<String>,
        leaf: impl Into<String>,
    ) -> Self {
        Self {
            level1: level1.into(),
            level2: level2.into(),
            level3: level3.into(),
            leaf: leaf.into(),
        }
    }

    /// The value of a single component.
    pub fn get(&self, field: KeyField) -> &str {
        match field {
            KeyField::Level1 => &self.level1,
            KeyField::Level2 => &self.level2,
            KeyField::Level3 => &self.level3,
            KeyField::Leaf => &self.leaf,
        }
    }

    /// Components paired with their field names, in path order.
    pub fn components(&self) -> [(KeyField, &str); 4] {
        KeyField::ALL.map(|field| (field, self.get(field)))
    }

    /// The first empty component, if any.
    pub fn first_missing(&self) -> Option<KeyField> {
        self.components()
            .into_iter()
            .find(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
    }

    /// Returns `true` if every component is non-empty.
    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.level1, self.level2, self.level3, self.leaf
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_key() {
        let key = GroupingKey::new("PAT1", "STU1", "SER1", "SOP1");
        assert!(key.is_complete());
        assert_eq!(key.first_missing(), None);
        assert_eq!(key.to_string(), "PAT1/STU1/SER1/SOP1");
    }

    #[test]
    fn reports_first_missing_component() {
        let key = GroupingKey::new("PAT1", "", "", "SOP1");
        assert!(!key.is_complete());
        assert_eq!(key.first_missing(), Some(KeyField::Level2));

        let key = GroupingKey::new("PAT1", "STU1", "SER1", "");
        assert_eq!(key.first_missing(), Some(KeyField::Leaf));
    }

    #[test]
    fn components_are_in_path_order() {
        let key = GroupingKey::new("a", "b", "c", "d");
        let values: Vec<&str> = key.components().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
        assert_eq!(key.get(KeyField::Level3), "c");
    }

    #[test]
    fn field_names() {
        assert_eq!(KeyField::Level1.to_string(), "level1");
        assert_eq!(KeyField::Leaf.to_string(), "leaf");
    }
}
