//! # sam-header
//!
//! A library for reading, validating and writing SAM text headers.
//!
//! Headers found in the wild are often slightly off: lower-case record codes,
//! missing `VN` tags, sort orders spelled `Coordinate`, duplicated `@SQ` lines.
//! `sam-header` decodes such headers tolerantly. It keeps everything it can and
//! reports each problem as a structured diagnostic instead of failing.
//!
//! ## Features
//!
//! - **Loose classification**: `@hd`, `@Sq`, ... are recognised in any case
//! - **Strict fields**: tags and values are kept exactly as written
//! - **Typed views**: sort order, group order, platform and topology are read
//!   through controlled vocabularies that never overwrite the raw value
//! - **Canonical encoding**: `decode(encode(header)) == header`
//! - **Diagnostics**: line-numbered, categorised, with adjustable stringency
//!
//! ## Example
//!
//! ```rust
//! use sam_header::{DiagnosticKind, SamTextHeaderCodec, SortOrder};
//!
//! let codec = SamTextHeaderCodec::new();
//! let text = "@hd\tVN:1.6\tSO:Coordinate\n@SQ\tSN:chr1\tLN:248956422\n@XX\tfoo\n";
//! let outcome = codec.decode_str(text);
//!
//! let mut header = outcome.header;
//! assert_eq!(header.sort_order(), SortOrder::Coordinate);
//! assert_eq!(header.get_sequence("chr1").and_then(|s| s.length()), Some(248_956_422));
//! assert!(header.get_sequence("chr2").is_none());
//!
//! assert_eq!(outcome.diagnostics.len(), 1);
//! assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::UnrecognizedRecordType);
//!
//! header.set_sort_order(SortOrder::Queryname);
//! assert_eq!(header.get_attribute("SO"), Some("queryname"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Header model, attribute store and controlled vocabularies
//! - [`parsing`]: Text codec, diagnostics and input detection
//! - [`utils`]: Field value validation helpers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::attributes::{AttributeStore, TypedField, TypedFieldMut, Vocabulary};
pub use core::dictionary::{SequenceDictionary, SequenceEntry};
pub use core::header::SamHeader;
pub use core::record::{HeaderRecord, RecordType};
pub use core::types::*;
pub use parsing::diagnostics::{
    DiagnosticKind, DiagnosticSink, Severity, ValidationDiagnostic, ValidationStringency,
};
pub use parsing::sam::{DecodeOutcome, ParseError, SamTextHeaderCodec};
