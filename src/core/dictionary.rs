use serde::Serialize;

use crate::core::attributes::{AttributeStore, TypedField};
use crate::core::record::HeaderRecord;
use crate::core::types::Topology;
use crate::utils::validation::normalize_md5;

/// Sequence name tag
pub const NAME_TAG: &str = "SN";
/// Sequence length tag
pub const LENGTH_TAG: &str = "LN";
/// Sequence MD5 checksum tag
pub const MD5_TAG: &str = "M5";
/// Alternative sequence names tag
pub const ALT_NAMES_TAG: &str = "AN";

/// A single `@SQ` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SequenceEntry {
    attributes: AttributeStore,
}

impl SequenceEntry {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        let mut attributes = AttributeStore::with_capacity(2);
        attributes.set(NAME_TAG, name);
        attributes.set(LENGTH_TAG, length.to_string());
        Self { attributes }
    }

    #[must_use]
    pub fn from_attributes(attributes: AttributeStore) -> Self {
        Self { attributes }
    }

    /// Sequence name (`SN`); empty when the record omitted it
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes.get(NAME_TAG).unwrap_or_default()
    }

    /// Sequence length (`LN`), if present and numeric
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.attributes.get(LENGTH_TAG).and_then(|v| v.parse().ok())
    }

    #[must_use]
    pub fn md5(&self) -> Option<&str> {
        self.attributes.get(MD5_TAG)
    }

    /// `M5` in lower case, or `None` when absent or not a valid MD5
    #[must_use]
    pub fn normalized_md5(&self) -> Option<String> {
        self.md5().and_then(normalize_md5)
    }

    /// Alternative names from the comma-separated `AN` tag
    #[must_use]
    pub fn alternative_names(&self) -> Vec<&str> {
        self.attributes
            .get(ALT_NAMES_TAG)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        TypedField::<Topology>::new(&self.attributes).get()
    }

    #[must_use]
    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.attributes.set(MD5_TAG, md5);
        self
    }

    #[must_use]
    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    #[must_use]
    pub fn into_record(self) -> HeaderRecord {
        HeaderRecord::Sequence(self.attributes)
    }
}

/// Ordered collection of `@SQ` entries, looked up by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SequenceDictionary {
    entries: Vec<SequenceEntry>,
}

impl SequenceDictionary {
    #[must_use]
    pub fn new(entries: Vec<SequenceEntry>) -> Self {
        Self { entries }
    }

    /// Build a dictionary from the `@SQ` records in `records`, in order
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HeaderRecord>) -> Self {
        let entries = records
            .into_iter()
            .filter_map(|r| match r {
                HeaderRecord::Sequence(attrs) => Some(SequenceEntry::from_attributes(attrs.clone())),
                _ => None,
            })
            .collect();
        Self { entries }
    }

    /// Entry named `name`; `None` when no entry has that name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SequenceEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Position of the entry named `name`
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    pub fn push(&mut self, entry: SequenceEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SequenceEntry> {
        self.entries.iter()
    }

    /// Sum of all parseable `LN` values
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.entries.iter().filter_map(SequenceEntry::length).sum()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<HeaderRecord> {
        self.entries
            .into_iter()
            .map(SequenceEntry::into_record)
            .collect()
    }
}

impl FromIterator<SequenceEntry> for SequenceDictionary {
    fn from_iter<I: IntoIterator<Item = SequenceEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SequenceDictionary {
    type Item = &'a SequenceEntry;
    type IntoIter = std::slice::Iter<'a, SequenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_entry_new() {
        let entry = SequenceEntry::new("chr1", 248_956_422);
        assert_eq!(entry.name(), "chr1");
        assert_eq!(entry.length(), Some(248_956_422));
        assert!(entry.md5().is_none());
        assert_eq!(entry.topology(), Topology::Linear);

        let pairs: Vec<_> = entry.attributes().iter().collect();
        assert_eq!(pairs, vec![("SN", "chr1"), ("LN", "248956422")]);
    }

    #[test]
    fn test_normalized_md5() {
        let entry = SequenceEntry::new("chrM", 16569).with_md5("C68F52674C9FB33AEF52DCF399755519");
        assert_eq!(
            entry.normalized_md5().as_deref(),
            Some("c68f52674c9fb33aef52dcf399755519")
        );
        // the raw value is untouched
        assert_eq!(entry.md5(), Some("C68F52674C9FB33AEF52DCF399755519"));

        assert!(SequenceEntry::new("chr1", 10).with_md5("bogus").normalized_md5().is_none());
        assert!(SequenceEntry::new("chr1", 10).normalized_md5().is_none());
    }

    #[test]
    fn test_alternative_names() {
        let mut entry = SequenceEntry::new("chrM", 16569);
        entry.attributes_mut().set("AN", "MT, chrMT,,NC_012920.1");
        assert_eq!(entry.alternative_names(), vec!["MT", "chrMT", "NC_012920.1"]);
    }

    #[test]
    fn test_lookup_by_name() {
        let dict: SequenceDictionary = [SequenceEntry::new("chr1", 1), SequenceEntry::new("chr2", 2)]
            .into_iter()
            .collect();

        assert_eq!(dict.get("chr2").and_then(SequenceEntry::length), Some(2));
        assert_eq!(dict.index_of("chr2"), Some(1));
        assert!(dict.get("chr3").is_none());
        assert!(dict.get("CHR1").is_none());
        assert_eq!(dict.total_length(), 3);
    }

    #[test]
    fn test_lookup_in_empty_dictionary() {
        let dict = SequenceDictionary::default();
        assert!(dict.is_empty());
        assert!(dict.get("chr1").is_none());
        assert!(dict.index_of("chr1").is_none());
    }

    #[test]
    fn test_from_records_skips_other_types() {
        let records = vec![
            HeaderRecord::Comment("hello".into()),
            SequenceEntry::new("chr1", 10).into_record(),
            HeaderRecord::ReadGroup([("ID", "rg1")].into_iter().collect()),
            SequenceEntry::new("chr2", 20).into_record(),
        ];
        let dict = SequenceDictionary::from_records(&records);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.iter().map(SequenceEntry::name).collect::<Vec<_>>(), vec!["chr1", "chr2"]);
    }
}
