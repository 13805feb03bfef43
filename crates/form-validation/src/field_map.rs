//! Ordered field-keyed maps used for derived form state.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Insertion-ordered map from field name to a per-field value.
///
/// Forms are small, so lookups scan linearly; keeping declaration order
/// matters more than lookup speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<T> {
    entries: Vec<(String, T)>,
}

/// Current raw value of every field.
pub type FieldValues = FieldMap<String>;

/// Current error, if any, of every field.
pub type FieldErrors = FieldMap<Option<String>>;

impl<T> FieldMap<T> {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up the entry for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Mutable access to the entry for `field`.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Whether `field` is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Insert or replace the entry for `field`, keeping its original position.
    pub fn insert(&mut self, field: impl Into<String>, value: T) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Iterate over `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Mutable iteration over the values in declaration order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for FieldMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, value) in iter {
            map.insert(field, value);
        }
        map
    }
}

impl<T> IntoIterator for FieldMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Read access to the current values of sibling fields.
///
/// Cross-field rules such as `equals` resolve their target through this
/// trait, so the validator accepts the engine's [`FieldValues`] as well as
/// plain maps built by callers.
pub trait ValueLookup {
    /// Current value of `field`, or `None` when the field is unknown.
    fn value_of(&self, field: &str) -> Option<&str>;
}

impl ValueLookup for FieldValues {
    fn value_of(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<S: BuildHasher> ValueLookup for HashMap<String, String, S> {
    fn value_of(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl ValueLookup for BTreeMap<String, String> {
    fn value_of(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl ValueLookup for [(&str, &str)] {
    fn value_of(&self, field: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> ValueLookup for [(&str, &str); N] {
    fn value_of(&self, field: &str) -> Option<&str> {
        self.as_slice().value_of(field)
    }
}
