//! Per-record-type field rules.
//!
//! | Record | Required | Checked values |
//! |--------|----------|----------------|
//! | `@HD`  | VN       | VN `<major>.<minor>` |
//! | `@SQ`  | SN, LN   | SN name grammar, LN 1..=2^31-1, M5 MD5, AN names |
//! | `@RG`  | ID       | DT ISO 8601, PI integer, FO flow order |
//! | `@PG`  | ID       | |
//!
//! Controlled-vocabulary tags (`SO`, `GO`, `PL`, `TP`) are free text here;
//! matching them is the job of the typed accessors on the model.

use crate::core::record::RecordType;
use crate::utils::validation::{
    is_valid_iso8601, is_valid_md5, is_valid_sequence_name, is_valid_version,
    parse_sequence_length,
};

/// Tags a record of `record_type` must carry
#[must_use]
pub fn required_tags(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Header => &["VN"],
        RecordType::Sequence => &["SN", "LN"],
        RecordType::ReadGroup | RecordType::Program => &["ID"],
        RecordType::Comment => &[],
    }
}

/// Check `value` for `tag` on a `record_type` line.
///
/// Returns a description of the problem, or `None` when the value is acceptable
/// or the tag has no value grammar.
#[must_use]
pub fn check_value(record_type: RecordType, tag: &str, value: &str) -> Option<String> {
    match (record_type, tag) {
        (RecordType::Header, "VN") if !is_valid_version(value) => {
            Some(format!("VN:{value} is not of the form <major>.<minor>"))
        }
        (RecordType::Sequence, "SN") if !is_valid_sequence_name(value) => {
            Some(format!("SN:{value} is not a valid reference sequence name"))
        }
        (RecordType::Sequence, "LN") if parse_sequence_length(value).is_none() => {
            Some(format!("LN:{value} is not an integer in the range 1..=2147483647"))
        }
        (RecordType::Sequence, "M5") if !is_valid_md5(value) => {
            Some(format!("M5:{value} is not a 32 character hex MD5 checksum"))
        }
        (RecordType::Sequence, "AN") => value
            .split(',')
            .find(|name| !is_valid_sequence_name(name))
            .map(|name| format!("AN contains invalid alternative name '{name}'")),
        (RecordType::ReadGroup, "DT") if !is_valid_iso8601(value) => {
            Some(format!("DT:{value} is not an ISO 8601 date or date-time"))
        }
        (RecordType::ReadGroup, "PI") if value.parse::<i64>().is_err() => {
            Some(format!("PI:{value} is not an integer"))
        }
        (RecordType::ReadGroup, "FO") if !is_valid_flow_order(value) => {
            Some(format!("FO:{value} is not '*' or a string of IUPAC bases"))
        }
        _ => None,
    }
}

fn is_valid_flow_order(value: &str) -> bool {
    value == "*"
        || (!value.is_empty()
            && value
                .bytes()
                .all(|b| b"ACMGRSVTWYHKDBN".contains(&b.to_ascii_uppercase())))
}
