//! Structured, non-fatal validation diagnostics.
//!
//! Decoding never fails on bad data. Every problem the codec notices becomes a
//! [`ValidationDiagnostic`] handed to a [`DiagnosticSink`]; the caller decides
//! which of them matter.

use serde::Serialize;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Line does not start with `@` followed by a known two-letter code; the line is skipped
    UnrecognizedRecordType,
    /// Field without a `:` separator or with an ill-formed tag; the field is skipped
    MalformedField,
    /// A tag required for the record type is absent; the record is kept
    MissingRequiredField,
    /// Two records share a key that must be unique (or two `@HD` lines)
    DuplicateUniqueKey,
    /// The same tag appears twice on one line; the first value is kept
    DuplicateTag,
    /// A value does not match the grammar for its tag
    InvalidFieldValue,
    /// `@HD` is not the first line
    MisplacedHeaderLine,
    /// `@PG PP` names a program ID that is not in the header
    UnknownProgramReference,
    /// Line is not valid UTF-8; invalid bytes are replaced with U+FFFD and decoding continues
    InvalidEncoding,
}

impl DiagnosticKind {
    /// Severity used under [`ValidationStringency::Lenient`]
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::UnrecognizedRecordType
            | Self::MalformedField
            | Self::MissingRequiredField
            | Self::DuplicateUniqueKey
            | Self::DuplicateTag => Severity::Error,
            Self::InvalidFieldValue
            | Self::MisplacedHeaderLine
            | Self::UnknownProgramReference
            | Self::InvalidEncoding => Severity::Warning,
        }
    }

    /// Fixed message prefix, so callers can match on text as well as on kind
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::UnrecognizedRecordType => "Unrecognized header record type",
            Self::MalformedField => "Malformed header field",
            Self::MissingRequiredField => "Missing required field",
            Self::DuplicateUniqueKey => "Duplicate unique key",
            Self::DuplicateTag => "Duplicate tag",
            Self::InvalidFieldValue => "Invalid field value",
            Self::MisplacedHeaderLine => "Misplaced @HD line",
            Self::UnknownProgramReference => "Unknown previous program",
            Self::InvalidEncoding => "Invalid UTF-8",
        }
    }
}

/// A single data-quality problem found while decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// 1-based line number in the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    /// Text of the offending line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl ValidationDiagnostic {
    /// Diagnostic with the kind's default severity; `detail` follows the kind's description
    pub fn new(kind: DiagnosticKind, detail: impl AsRef<str>) -> Self {
        let detail = detail.as_ref();
        let message = if detail.is_empty() {
            kind.description().to_string()
        } else {
            format!("{}: {detail}", kind.description())
        };
        Self {
            kind,
            severity: kind.default_severity(),
            message,
            line_number: None,
            line: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line_number: usize, line: impl Into<String>) -> Self {
        self.line_number = Some(line_number);
        self.line = Some(line.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(n) = self.line_number {
            write!(f, "Line {n}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(line) = &self.line {
            write!(f, "; Line: {line}")?;
        }
        Ok(())
    }
}

/// How diagnostics are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStringency {
    /// Every diagnostic is reported as an error
    Strict,
    /// Diagnostics keep their kind's default severity
    #[default]
    Lenient,
    /// Nothing is reported
    Silent,
}

impl ValidationStringency {
    /// Apply this stringency to `diagnostic`; `None` means drop it
    #[must_use]
    pub fn apply(self, diagnostic: ValidationDiagnostic) -> Option<ValidationDiagnostic> {
        match self {
            Self::Strict => Some(diagnostic.with_severity(Severity::Error)),
            Self::Lenient => Some(diagnostic),
            Self::Silent => None,
        }
    }
}

/// Receiver for diagnostics produced during a decode
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: ValidationDiagnostic);
}

impl DiagnosticSink for Vec<ValidationDiagnostic> {
    fn report(&mut self, diagnostic: ValidationDiagnostic) {
        self.push(diagnostic);
    }
}

impl<F: FnMut(ValidationDiagnostic)> DiagnosticSink for F {
    fn report(&mut self, diagnostic: ValidationDiagnostic) {
        self(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefix() {
        let d = ValidationDiagnostic::new(DiagnosticKind::UnrecognizedRecordType, "XX");
        assert_eq!(d.message, "Unrecognized header record type: XX");
        assert_eq!(d.severity, Severity::Error);

        let bare = ValidationDiagnostic::new(DiagnosticKind::MisplacedHeaderLine, "");
        assert_eq!(bare.message, "Misplaced @HD line");
        assert_eq!(bare.severity, Severity::Warning);
    }

    #[test]
    fn test_display_with_line() {
        let d = ValidationDiagnostic::new(DiagnosticKind::MalformedField, "Not a tag-value pair: VN1.0")
            .at_line(3, "@HD\tVN1.0");
        assert_eq!(
            d.to_string(),
            "ERROR: Line 3: Malformed header field: Not a tag-value pair: VN1.0; Line: @HD\tVN1.0"
        );
    }

    #[test]
    fn test_display_without_line() {
        let d = ValidationDiagnostic::new(DiagnosticKind::DuplicateUniqueKey, "@SQ SN:chr1");
        assert_eq!(d.to_string(), "ERROR: Duplicate unique key: @SQ SN:chr1");
    }

    #[test]
    fn test_stringency() {
        let warning = ValidationDiagnostic::new(DiagnosticKind::InvalidFieldValue, "LN:0");
        assert_eq!(
            ValidationStringency::Strict.apply(warning.clone()).map(|d| d.severity),
            Some(Severity::Error)
        );
        assert_eq!(
            ValidationStringency::Lenient.apply(warning.clone()).map(|d| d.severity),
            Some(Severity::Warning)
        );
        assert!(ValidationStringency::Silent.apply(warning).is_none());
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = |_d: ValidationDiagnostic| count += 1;
            sink.report(ValidationDiagnostic::new(DiagnosticKind::DuplicateTag, "SN"));
            sink.report(ValidationDiagnostic::new(DiagnosticKind::DuplicateTag, "LN"));
        }
        assert_eq!(count, 2);
    }
}
