//! Centralized validation helpers for header field values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Largest legal `LN` value (2^31 - 1)
pub const MAX_SEQUENCE_LENGTH: u64 = (1 << 31) - 1;

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use sam_header::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize an MD5 string to lowercase.
/// Returns None if the input is not a valid MD5.
#[must_use]
pub fn normalize_md5(s: &str) -> Option<String> {
    if is_valid_md5(s) {
        Some(s.to_lowercase())
    } else {
        None
    }
}

/// A field tag is one letter followed by one letter or digit (`/[A-Za-z][A-Za-z0-9]/`)
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_alphanumeric()
}

/// `@HD VN` must look like `<major>.<minor>`
///
/// ```
/// use sam_header::utils::validation::is_valid_version;
///
/// assert!(is_valid_version("1.6"));
/// assert!(!is_valid_version("1.6a"));
/// ```
#[must_use]
pub fn is_valid_version(s: &str) -> bool {
    match s.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Parse an `LN` value, accepting only 1..=2^31-1
#[must_use]
pub fn parse_sequence_length(s: &str) -> Option<u64> {
    s.parse::<u64>()
        .ok()
        .filter(|&len| (1..=MAX_SEQUENCE_LENGTH).contains(&len))
}

/// Check an `@SQ SN` value against the reference name grammar.
///
/// Names may use any printable ASCII except `\ , " ' ` ( ) [ ] { } < >`, and
/// may not start with `*` or `=`.
#[must_use]
pub fn is_valid_sequence_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if first == '*' || first == '=' {
        return false;
    }
    name.chars().all(|c| {
        c.is_ascii_graphic()
            && !matches!(
                c,
                '\\' | ',' | '"' | '\'' | '`' | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>'
            )
    })
}

/// `@RG DT` must be an ISO 8601 date or date-time
#[must_use]
pub fn is_valid_iso8601(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z").is_ok()
}
