//! Ordered tag/value storage backing a single header line.
//!
//! An [`AttributeStore`] holds the `TAG:VALUE` fields of one `@HD`, `@SQ`, `@RG`
//! or `@PG` line. Keys are case-sensitive and unique; insertion order is kept so
//! that re-encoding writes fields back in the order they were read.
//!
//! Fields with a controlled vocabulary (sort order, group order, ...) are never
//! stored separately. [`TypedField`] and [`TypedFieldMut`] are thin views over the
//! store: reads match the raw string case-insensitively against the
//! [`Vocabulary`], writes store the canonical spelling.

use std::marker::PhantomData;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A closed set of named values bound to a single header tag.
///
/// `ALL` lists the recognised variants (excluding `UNKNOWN`). Matching is
/// case-insensitive and never fails: unmatched input maps to `UNKNOWN`.
pub trait Vocabulary: Copy + Eq + Sized + 'static {
    /// Tag in the attribute store that holds this field
    const TAG: &'static str;

    /// Recognised variants
    const ALL: &'static [Self];

    /// Fallback for values that match no variant
    const UNKNOWN: Self;

    /// Value reported when the tag is absent
    const DEFAULT: Self;

    /// The exact documented spelling of this variant
    fn canonical_name(self) -> &'static str;

    /// Match `name` case-insensitively against the known variants.
    #[must_use]
    fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.canonical_name().eq_ignore_ascii_case(name))
            .unwrap_or(Self::UNKNOWN)
    }
}

/// Ordered, string-keyed map of the fields on one header line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    entries: Vec<(String, String)>,
}

impl AttributeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Exact, case-sensitive lookup of `tag`
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == tag)
    }

    /// Insert or overwrite `tag`, storing `value` verbatim.
    ///
    /// An existing tag keeps its position. Returns the previous value, if any.
    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let tag = tag.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((tag, value));
        None
    }

    /// Remove `tag` if present
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(t, _)| t == tag)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields as `(tag, value)` pairs in insertion order.
    ///
    /// The iterator is `Clone`, so a consumer can restart it cheaply.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Read-only typed view of the field bound to `V::TAG`
    #[must_use]
    pub fn typed<V: Vocabulary>(&self) -> TypedField<'_, V> {
        TypedField::new(self)
    }

    /// Mutable typed view of the field bound to `V::TAG`
    pub fn typed_mut<V: Vocabulary>(&mut self) -> TypedFieldMut<'_, V> {
        TypedFieldMut::new(self)
    }
}

/// Iterator over the fields of an [`AttributeStore`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AttributeStore {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (tag, value) in iter {
            store.set(tag, value);
        }
        store
    }
}

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(tag, value)?;
        }
        map.end()
    }
}

/// Read-only view of a controlled-vocabulary field
pub struct TypedField<'a, V> {
    store: &'a AttributeStore,
    vocabulary: PhantomData<V>,
}

impl<'a, V: Vocabulary> TypedField<'a, V> {
    #[must_use]
    pub fn new(store: &'a AttributeStore) -> Self {
        Self {
            store,
            vocabulary: PhantomData,
        }
    }

    /// Current value: `V::DEFAULT` when absent, `V::UNKNOWN` when unrecognised
    #[must_use]
    pub fn get(&self) -> V {
        self.store.get(V::TAG).map_or(V::DEFAULT, V::from_name)
    }

    /// The stored string, exactly as written
    #[must_use]
    pub fn raw(&self) -> Option<&'a str> {
        self.store.get(V::TAG)
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.store.contains(V::TAG)
    }
}

/// Mutable view of a controlled-vocabulary field
pub struct TypedFieldMut<'a, V> {
    store: &'a mut AttributeStore,
    vocabulary: PhantomData<V>,
}

impl<'a, V: Vocabulary> TypedFieldMut<'a, V> {
    pub fn new(store: &'a mut AttributeStore) -> Self {
        Self {
            store,
            vocabulary: PhantomData,
        }
    }

    #[must_use]
    pub fn get(&self) -> V {
        TypedField::<V>::new(&*self.store).get()
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.store.get(V::TAG)
    }

    /// Store the canonical name of `value`, replacing whatever casing was there
    pub fn set(&mut self, value: V) {
        self.store.set(V::TAG, value.canonical_name());
    }

    /// Store an arbitrary string; the next [`get`](Self::get) re-derives from it
    pub fn set_raw(&mut self, value: impl Into<String>) {
        self.store.set(V::TAG, value);
    }

    pub fn clear(&mut self) -> Option<String> {
        self.store.remove(V::TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GroupOrder, SortOrder};

    #[test]
    fn test_set_get_remove() {
        let mut store = AttributeStore::new();
        assert!(store.get("VN").is_none());

        assert_eq!(store.set("VN", "1.6"), None);
        assert_eq!(store.get("VN"), Some("1.6"));
        assert_eq!(store.set("VN", "1.5"), Some("1.6".to_string()));
        assert_eq!(store.get("VN"), Some("1.5"));

        assert_eq!(store.remove("VN"), Some("1.5".to_string()));
        assert_eq!(store.remove("VN"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut store = AttributeStore::new();
        store.set("SO", "coordinate");
        assert!(store.get("so").is_none());
        assert!(store.get("So").is_none());
        assert_eq!(store.get("SO"), Some("coordinate"));
    }

    #[test]
    fn test_insertion_order_preserved_on_overwrite() {
        let mut store = AttributeStore::new();
        store.set("ID", "rg1");
        store.set("SM", "sample");
        store.set("PL", "ILLUMINA");
        store.set("ID", "rg2");

        let pairs: Vec<_> = store.iter().collect();
        assert_eq!(
            pairs,
            vec![("ID", "rg2"), ("SM", "sample"), ("PL", "ILLUMINA")]
        );
    }

    #[test]
    fn test_iter_is_restartable() {
        let store: AttributeStore = [("SN", "chr1"), ("LN", "100")].into_iter().collect();
        let iter = store.iter();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(store.iter().len(), 2);
    }

    #[test]
    fn test_typed_field_reads_through() {
        let mut store = AttributeStore::new();
        assert_eq!(store.typed::<SortOrder>().get(), SortOrder::Unknown);
        assert!(!store.typed::<SortOrder>().is_set());

        store.set("SO", "QueryName");
        assert_eq!(store.typed::<SortOrder>().get(), SortOrder::Queryname);
        assert_eq!(store.typed::<SortOrder>().raw(), Some("QueryName"));
    }

    #[test]
    fn test_typed_field_write_normalizes_case() {
        let mut store = AttributeStore::new();
        store.set("GO", "REFERENCE");

        let mut field = store.typed_mut::<GroupOrder>();
        assert_eq!(field.get(), GroupOrder::Reference);
        field.set(GroupOrder::Reference);
        assert_eq!(field.raw(), Some("reference"));

        field.set_raw("garbled");
        assert_eq!(field.get(), GroupOrder::Unknown);
        assert_eq!(field.clear(), Some("garbled".to_string()));
        assert_eq!(field.get(), GroupOrder::None);
    }

    #[test]
    fn test_serialize_keeps_order() {
        let store: AttributeStore = [("VN", "1.6"), ("SO", "coordinate")].into_iter().collect();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"VN":"1.6","SO":"coordinate"}"#);
    }
}
