//! In-memory model of a SAM header.
//!
//! - [`AttributeStore`](attributes::AttributeStore): ordered `TAG:VALUE` fields of one line
//! - [`Vocabulary`](attributes::Vocabulary) and the typed views over a store
//! - [`SortOrder`](types::SortOrder), [`GroupOrder`](types::GroupOrder),
//!   [`Platform`](types::Platform), [`Topology`](types::Topology): controlled vocabularies
//! - [`HeaderRecord`](record::HeaderRecord): one line of any record type
//! - [`SequenceDictionary`](dictionary::SequenceDictionary): the `@SQ` entries, by name
//! - [`SamHeader`](header::SamHeader): the whole header
//!
//! The attribute store is the only source of truth. A typed value such as the
//! sort order is derived from its raw string on every read and never cached.

pub mod attributes;
pub mod dictionary;
pub mod header;
pub mod record;
pub mod types;
