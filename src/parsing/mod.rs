//! Decoding and encoding of SAM text headers.
//!
//! - [`sam`]: the [`SamTextHeaderCodec`](sam::SamTextHeaderCodec) state machine
//! - [`diagnostics`]: structured, non-fatal validation diagnostics
//! - [`grammar`]: required tags and value rules per record type
//! - [`input`]: line sources for SAM, gzipped SAM, BAM and stdin
//!
//! ## Example
//!
//! ```rust
//! use sam_header::parsing::sam::SamTextHeaderCodec;
//! use sam_header::SortOrder;
//!
//! let codec = SamTextHeaderCodec::new();
//! let outcome = codec.decode_str("@hd\tVN:1.0\tSO:unsorted\n");
//!
//! assert!(outcome.diagnostics.is_empty());
//! assert_eq!(outcome.header.sort_order(), SortOrder::Unsorted);
//! assert_eq!(codec.encode_to_string(&outcome.header), "@HD\tVN:1.0\tSO:unsorted\n");
//! ```
//!
//! ## Record Types
//!
//! | Code | Meaning | Required tags |
//! |------|---------|---------------|
//! | HD   | File-level metadata | VN |
//! | SQ   | Reference sequence | SN, LN |
//! | RG   | Read group | ID |
//! | PG   | Program | ID |
//! | CO   | Free-text comment | - |

pub mod diagnostics;
pub mod grammar;
pub mod input;
pub mod sam;
