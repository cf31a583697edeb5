use serde::Serialize;

use crate::core::attributes::AttributeStore;

/// Kind of header line, identified by the two-letter code after `@`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordType {
    /// `@HD` file-level metadata
    Header,
    /// `@SQ` reference sequence dictionary entry
    Sequence,
    /// `@RG` read group
    ReadGroup,
    /// `@PG` program
    Program,
    /// `@CO` free-text comment
    Comment,
}

impl RecordType {
    pub const ALL: [RecordType; 5] = [
        Self::Header,
        Self::Sequence,
        Self::ReadGroup,
        Self::Program,
        Self::Comment,
    ];

    /// Canonical (upper-case) two-letter code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Header => "HD",
            Self::Sequence => "SQ",
            Self::ReadGroup => "RG",
            Self::Program => "PG",
            Self::Comment => "CO",
        }
    }

    /// Classify a record-type code, ignoring ASCII case.
    ///
    /// `"hd"`, `"Hd"` and `"HD"` all classify as [`RecordType::Header`]; anything
    /// that is not exactly one of the five codes returns `None`.
    #[must_use]
    pub fn classify(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }

    /// Tag holding the value that must be unique across records of this type
    #[must_use]
    pub fn unique_key_tag(self) -> Option<&'static str> {
        match self {
            Self::Sequence => Some("SN"),
            Self::ReadGroup | Self::Program => Some("ID"),
            Self::Header | Self::Comment => None,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.code())
    }
}

/// One line of a SAM header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "fields")]
pub enum HeaderRecord {
    #[serde(rename = "HD")]
    Header(AttributeStore),
    #[serde(rename = "SQ")]
    Sequence(AttributeStore),
    #[serde(rename = "RG")]
    ReadGroup(AttributeStore),
    #[serde(rename = "PG")]
    Program(AttributeStore),
    #[serde(rename = "CO")]
    Comment(String),
}

impl HeaderRecord {
    /// Create an empty record of the given type
    #[must_use]
    pub fn empty(record_type: RecordType) -> Self {
        match record_type {
            RecordType::Header => Self::Header(AttributeStore::new()),
            RecordType::Sequence => Self::Sequence(AttributeStore::new()),
            RecordType::ReadGroup => Self::ReadGroup(AttributeStore::new()),
            RecordType::Program => Self::Program(AttributeStore::new()),
            RecordType::Comment => Self::Comment(String::new()),
        }
    }

    /// Wrap `attributes` in the variant for `record_type`.
    ///
    /// Returns `None` for [`RecordType::Comment`], which carries text instead.
    #[must_use]
    pub fn from_attributes(record_type: RecordType, attributes: AttributeStore) -> Option<Self> {
        match record_type {
            RecordType::Header => Some(Self::Header(attributes)),
            RecordType::Sequence => Some(Self::Sequence(attributes)),
            RecordType::ReadGroup => Some(Self::ReadGroup(attributes)),
            RecordType::Program => Some(Self::Program(attributes)),
            RecordType::Comment => None,
        }
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Header(_) => RecordType::Header,
            Self::Sequence(_) => RecordType::Sequence,
            Self::ReadGroup(_) => RecordType::ReadGroup,
            Self::Program(_) => RecordType::Program,
            Self::Comment(_) => RecordType::Comment,
        }
    }

    #[must_use]
    pub fn attributes(&self) -> Option<&AttributeStore> {
        match self {
            Self::Header(a) | Self::Sequence(a) | Self::ReadGroup(a) | Self::Program(a) => Some(a),
            Self::Comment(_) => None,
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut AttributeStore> {
        match self {
            Self::Header(a) | Self::Sequence(a) | Self::ReadGroup(a) | Self::Program(a) => Some(a),
            Self::Comment(_) => None,
        }
    }

    /// Shortcut for `attributes().and_then(|a| a.get(tag))`
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.attributes().and_then(|a| a.get(tag))
    }

    /// Value of the per-type unique key (`SN` for `@SQ`, `ID` for `@RG`/`@PG`)
    #[must_use]
    pub fn unique_key(&self) -> Option<&str> {
        self.record_type()
            .unique_key_tag()
            .and_then(|tag| self.get(tag))
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Comment(text) => Some(text),
            _ => None,
        }
    }
}
