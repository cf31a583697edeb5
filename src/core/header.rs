use serde::Serialize;

use crate::core::attributes::{AttributeStore, TypedField, TypedFieldMut, Vocabulary};
use crate::core::dictionary::{SequenceDictionary, SequenceEntry};
use crate::core::record::{HeaderRecord, RecordType};
use crate::core::types::{GroupOrder, SortOrder};

/// Format version tag on `@HD`
pub const VERSION_TAG: &str = "VN";
/// Sort order tag on `@HD`
pub const SORT_ORDER_TAG: &str = "SO";
/// Group order tag on `@HD`
pub const GROUP_ORDER_TAG: &str = "GO";
/// Previous program tag on `@PG`
pub const PREVIOUS_PROGRAM_TAG: &str = "PP";

/// Version written when a `@HD` line has to be created
pub const CURRENT_VERSION: &str = "1.6";

/// A complete SAM header: an ordered sequence of records of mixed types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SamHeader {
    records: Vec<HeaderRecord>,
}

impl SamHeader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<HeaderRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[HeaderRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<HeaderRecord> {
        &mut self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<HeaderRecord> {
        self.records
    }

    pub fn push(&mut self, record: HeaderRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one type, in header order
    pub fn records_of(&self, record_type: RecordType) -> impl Iterator<Item = &HeaderRecord> + '_ {
        self.records
            .iter()
            .filter(move |r| r.record_type() == record_type)
    }

    // === @HD ===

    /// Attributes of the first `@HD` record
    #[must_use]
    pub fn header_line(&self) -> Option<&AttributeStore> {
        self.records.iter().find_map(|r| match r {
            HeaderRecord::Header(attrs) => Some(attrs),
            _ => None,
        })
    }

    /// Attributes of the first `@HD` record
    pub fn header_line_mut(&mut self) -> Option<&mut AttributeStore> {
        self.records.iter_mut().find_map(|r| match r {
            HeaderRecord::Header(attrs) => Some(attrs),
            _ => None,
        })
    }

    /// Insert an `@HD` line carrying `VN:1.6` at the front if there is none
    pub fn ensure_header_line(&mut self) {
        self.with_header_line(|_| ());
    }

    /// Run `f` on the `@HD` attributes, creating the line at the front first if absent
    fn with_header_line<T>(&mut self, f: impl FnOnce(&mut AttributeStore) -> T) -> T {
        match self.header_line_mut() {
            Some(attrs) => f(attrs),
            None => {
                let mut attrs = AttributeStore::new();
                attrs.set(VERSION_TAG, CURRENT_VERSION);
                let out = f(&mut attrs);
                self.records.insert(0, HeaderRecord::Header(attrs));
                out
            }
        }
    }

    /// Raw value of `tag` on the `@HD` line
    #[must_use]
    pub fn get_attribute(&self, tag: &str) -> Option<&str> {
        self.header_line().and_then(|attrs| attrs.get(tag))
    }

    /// Set `tag` on the `@HD` line verbatim
    pub fn set_attribute(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.with_header_line(|attrs| {
            attrs.set(tag, value);
        });
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get_attribute(VERSION_TAG)
    }

    /// Sort order derived from the `SO` attribute; `unknown` when absent or unrecognised
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.header_line()
            .map_or(SortOrder::DEFAULT, |attrs| TypedField::<SortOrder>::new(attrs).get())
    }

    /// Write the canonical name of `order` to `SO`
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.with_header_line(|attrs| attrs.typed_mut::<SortOrder>().set(order));
    }

    /// Typed view of `SO`; `None` when there is no `@HD` line
    pub fn sort_order_field(&mut self) -> Option<TypedFieldMut<'_, SortOrder>> {
        self.header_line_mut().map(|attrs| attrs.typed_mut())
    }

    /// Group order derived from the `GO` attribute; `none` when absent
    #[must_use]
    pub fn group_order(&self) -> GroupOrder {
        self.header_line()
            .map_or(GroupOrder::DEFAULT, |attrs| {
                TypedField::<GroupOrder>::new(attrs).get()
            })
    }

    pub fn set_group_order(&mut self, order: GroupOrder) {
        self.with_header_line(|attrs| attrs.typed_mut::<GroupOrder>().set(order));
    }

    pub fn group_order_field(&mut self) -> Option<TypedFieldMut<'_, GroupOrder>> {
        self.header_line_mut().map(|attrs| attrs.typed_mut())
    }

    // === @SQ ===

    /// Sequence dictionary formed by the `@SQ` records
    #[must_use]
    pub fn sequence_dictionary(&self) -> SequenceDictionary {
        SequenceDictionary::from_records(&self.records)
    }

    /// Replace every `@SQ` record with the entries of `dictionary`.
    ///
    /// The new entries take the position of the first existing `@SQ` record, or
    /// follow the `@HD` line when there were none. `None` removes all entries.
    pub fn set_sequence_dictionary(&mut self, dictionary: Option<SequenceDictionary>) {
        let first_sq = self
            .records
            .iter()
            .position(|r| r.record_type() == RecordType::Sequence);
        self.records
            .retain(|r| r.record_type() != RecordType::Sequence);

        let Some(dictionary) = dictionary else {
            return;
        };

        let at = first_sq.unwrap_or_else(|| {
            self.records
                .iter()
                .position(|r| r.record_type() == RecordType::Header)
                .map_or(0, |idx| idx + 1)
        });
        let tail = self.records.split_off(at.min(self.records.len()));
        self.records.extend(dictionary.into_records());
        self.records.extend(tail);
    }

    /// Look up the `@SQ` entry named `name`; `None` when absent or when there is no dictionary
    #[must_use]
    pub fn get_sequence(&self, name: &str) -> Option<SequenceEntry> {
        self.records.iter().find_map(|r| match r {
            HeaderRecord::Sequence(attrs) if attrs.get("SN") == Some(name) => {
                Some(SequenceEntry::from_attributes(attrs.clone()))
            }
            _ => None,
        })
    }

    // === @RG / @PG / @CO ===

    pub fn read_groups(&self) -> impl Iterator<Item = &AttributeStore> + '_ {
        self.records.iter().filter_map(|r| match r {
            HeaderRecord::ReadGroup(attrs) => Some(attrs),
            _ => None,
        })
    }

    #[must_use]
    pub fn read_group(&self, id: &str) -> Option<&AttributeStore> {
        self.read_groups().find(|attrs| attrs.get("ID") == Some(id))
    }

    pub fn programs(&self) -> impl Iterator<Item = &AttributeStore> + '_ {
        self.records.iter().filter_map(|r| match r {
            HeaderRecord::Program(attrs) => Some(attrs),
            _ => None,
        })
    }

    #[must_use]
    pub fn program(&self, id: &str) -> Option<&AttributeStore> {
        self.programs().find(|attrs| attrs.get("ID") == Some(id))
    }

    /// ID of the last program in the `@PG` chain.
    ///
    /// The last program is the first one whose ID no other program names in
    /// its `PP` tag. Falls back to the last `@PG` record when the chain is cyclic.
    #[must_use]
    pub fn last_program_id(&self) -> Option<&str> {
        let referenced: Vec<&str> = self
            .programs()
            .filter_map(|attrs| attrs.get(PREVIOUS_PROGRAM_TAG))
            .collect();

        self.programs()
            .filter_map(|attrs| attrs.get("ID"))
            .find(|id| !referenced.contains(id))
            .or_else(|| self.programs().filter_map(|attrs| attrs.get("ID")).last())
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().filter_map(HeaderRecord::comment)
    }

    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.records.push(HeaderRecord::Comment(text.into()));
    }
}

impl FromIterator<HeaderRecord> for SamHeader {
    fn from_iter<I: IntoIterator<Item = HeaderRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
