//! Ordered field mapping handed to a [`DocumentSerializer`](super::DocumentSerializer).
//!
//! Keys are element names. A key starting with [`ATTRIBUTE_PREFIX`] becomes an
//! attribute of the enclosing element, the key [`TEXT_KEY`] becomes its text
//! content, and a [`FieldValue::List`] expands into repeated sibling elements
//! sharing one name. Insertion order is output order.

/// Prefix marking a key as an XML attribute.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding the text content of an element that also carries attributes.
pub const TEXT_KEY: &str = "#";

/// A value in a [`FieldMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Map(FieldMap),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for empty text, empty maps and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Map(m) => m.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Text(n.to_string())
    }
}

impl From<usize> for FieldValue {
    fn from(n: usize) -> Self {
        FieldValue::Text(n.to_string())
    }
}

impl From<FieldMap> for FieldValue {
    fn from(m: FieldMap) -> Self {
        FieldValue::Map(m)
    }
}

impl From<Vec<FieldMap>> for FieldValue {
    fn from(maps: Vec<FieldMap>) -> Self {
        FieldValue::List(maps.into_iter().map(FieldValue::Map).collect())
    }
}

/// An insertion-ordered map of element names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`. An existing key keeps its position and has its value replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` only when `value` is `Some`.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<FieldValue>>) {
        if let Some(v) = value {
            self.insert(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn get_map(&self, key: &str) -> Option<&FieldMap> {
        self.get(key).and_then(FieldValue::as_map)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Merge `other` into `self`: existing keys are overwritten in place, new keys appended.
    pub fn merge(&mut self, other: FieldMap) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
