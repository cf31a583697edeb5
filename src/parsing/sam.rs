//! Tolerant decoder and canonical encoder for SAM text headers.
//!
//! Decoding is a single forward pass over lines. Each line goes through two
//! deliberately different steps:
//!
//! 1. **classify** (loose): the record-type code after `@` is matched against
//!    `HD`, `SQ`, `RG`, `PG` and `CO` ignoring ASCII case, so `@hd` and `@Hd`
//!    are both header lines.
//! 2. **parse** (strict): `TAG:VALUE` fields are split and stored exactly as
//!    written; tags stay case-sensitive.
//!
//! Problems never abort the decode. They are reported as
//! [`ValidationDiagnostic`]s and the best-effort [`SamHeader`] is returned
//! alongside them. Only I/O failures of the line source are hard errors.
//!
//! Encoding writes one record per line with upper-case record codes and fields in
//! attribute-store order, so `decode(encode(header))` reproduces `header`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::core::attributes::AttributeStore;
use crate::core::header::{SamHeader, PREVIOUS_PROGRAM_TAG};
use crate::core::record::{HeaderRecord, RecordType};
use crate::parsing::diagnostics::{
    DiagnosticKind, DiagnosticSink, Severity, ValidationDiagnostic, ValidationStringency,
};
use crate::parsing::grammar::{check_value, required_tags};
use crate::utils::validation::is_valid_tag;

/// Marks the start of every header line
pub const HEADER_LINE_START: char = '@';
/// Separates the record code and fields
pub const FIELD_SEPARATOR: char = '\t';
/// Separates a field's tag from its value
pub const TAG_VALUE_SEPARATOR: char = ':';

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result of a decode: the header plus everything wrong with it
#[derive(Debug, Clone, Default)]
pub struct DecodeOutcome {
    pub header: SamHeader,
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl DecodeOutcome {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(ValidationDiagnostic::is_error)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Diagnostics of one kind
    pub fn diagnostics_of(
        &self,
        kind: DiagnosticKind,
    ) -> impl Iterator<Item = &ValidationDiagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    #[must_use]
    pub fn into_parts(self) -> (SamHeader, Vec<ValidationDiagnostic>) {
        (self.header, self.diagnostics)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Codec between SAM header text and [`SamHeader`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SamTextHeaderCodec {
    stringency: ValidationStringency,
}

impl SamTextHeaderCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stringency(stringency: ValidationStringency) -> Self {
        Self { stringency }
    }

    #[must_use]
    pub fn stringency(&self) -> ValidationStringency {
        self.stringency
    }

    /// Decode `lines`, collecting diagnostics into the outcome.
    ///
    /// Lines are pulled lazily; bounding the iterator (e.g. with `take_while`)
    /// stops the decode after the current line.
    pub fn decode<I, S>(&self, lines: I) -> DecodeOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut diagnostics = Vec::new();
        let header = self.decode_with_sink(lines, &mut diagnostics);
        DecodeOutcome {
            header,
            diagnostics,
        }
    }

    /// Decode `lines`, handing each diagnostic to `sink` as it is found
    pub fn decode_with_sink<I, S, K>(&self, lines: I, sink: &mut K) -> SamHeader
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        K: DiagnosticSink + ?Sized,
    {
        let mut decoder = Decoder::new(self.stringency, sink);
        for (idx, line) in lines.into_iter().enumerate() {
            decoder.decode_line(idx + 1, line.as_ref());
        }
        decoder.finish()
    }

    #[must_use]
    pub fn decode_str(&self, text: &str) -> DecodeOutcome {
        self.decode(text.lines())
    }

    /// Decode raw byte lines (without their `\n`).
    ///
    /// A line that is not valid UTF-8 is decoded with the invalid bytes replaced
    /// by U+FFFD and reported as [`DiagnosticKind::InvalidEncoding`].
    pub fn decode_bytes<I, B>(&self, lines: I) -> DecodeOutcome
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut diagnostics = Vec::new();
        let mut decoder = Decoder::new(self.stringency, &mut diagnostics);
        for (idx, line) in lines.into_iter().enumerate() {
            decoder.decode_bytes_line(idx + 1, line.as_ref());
        }
        let header = decoder.finish();
        DecodeOutcome {
            header,
            diagnostics,
        }
    }

    /// Decode every line of `reader`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails. Data problems, including
    /// bytes that are not UTF-8, are reported in the outcome's diagnostics.
    pub fn decode_reader<R: BufRead>(&self, reader: R) -> Result<DecodeOutcome, ParseError> {
        let mut io_error = None;
        let lines = reader.split(b'\n').map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                io_error = Some(e);
                None
            }
        });
        let outcome = self.decode_bytes(lines);

        match io_error {
            Some(e) => Err(ParseError::Io(e)),
            None => Ok(outcome),
        }
    }

    /// Write `header` as text, one record per line.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn encode<W: Write>(&self, header: &SamHeader, mut writer: W) -> io::Result<()> {
        for record in header.records() {
            writeln!(writer, "{}", encode_record(record))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn encode_to_string(&self, header: &SamHeader) -> String {
        let mut out = String::new();
        for record in header.records() {
            out.push_str(&encode_record(record));
            out.push('\n');
        }
        out
    }
}

/// Render a single record as one header line, without the trailing newline
#[must_use]
pub fn encode_record(record: &HeaderRecord) -> String {
    let mut line = String::new();
    line.push(HEADER_LINE_START);
    line.push_str(record.record_type().code());

    match record {
        HeaderRecord::Comment(text) => {
            line.push(FIELD_SEPARATOR);
            line.push_str(text);
        }
        _ => {
            for (tag, value) in record.attributes().into_iter().flatten() {
                line.push(FIELD_SEPARATOR);
                line.push_str(tag);
                line.push(TAG_VALUE_SEPARATOR);
                line.push_str(value);
            }
        }
    }

    line
}

/// A line split into its record-type code and the remainder
struct ClassifiedLine<'a> {
    record_type: RecordType,
    rest: &'a str,
    /// Whether a tab separated the code from `rest`
    separated: bool,
}

/// Per-decode state
struct Decoder<'s, K: ?Sized> {
    stringency: ValidationStringency,
    sink: &'s mut K,
    records: Vec<HeaderRecord>,
    /// Line number and text each record was decoded from
    sources: Vec<(usize, String)>,
}

impl<'s, K: DiagnosticSink + ?Sized> Decoder<'s, K> {
    fn new(stringency: ValidationStringency, sink: &'s mut K) -> Self {
        Self {
            stringency,
            sink,
            records: Vec::new(),
            sources: Vec::new(),
        }
    }

    fn report(&mut self, diagnostic: ValidationDiagnostic) {
        if let Some(diagnostic) = self.stringency.apply(diagnostic) {
            debug!(
                line = diagnostic.line_number,
                kind = ?diagnostic.kind,
                "{}",
                diagnostic.message
            );
            self.sink.report(diagnostic);
        }
    }

    fn seen(&self, record_type: RecordType) -> bool {
        self.records.iter().any(|r| r.record_type() == record_type)
    }

    fn report_at(&mut self, kind: DiagnosticKind, detail: String, line_number: usize, line: &str) {
        self.report(ValidationDiagnostic::new(kind, detail).at_line(line_number, line));
    }

    fn decode_bytes_line(&mut self, line_number: usize, bytes: &[u8]) {
        let line = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = line {
            self.report_at(
                DiagnosticKind::InvalidEncoding,
                "invalid bytes replaced with U+FFFD".to_string(),
                line_number,
                &line,
            );
        }
        self.decode_line(line_number, &line);
    }

    fn decode_line(&mut self, line_number: usize, line: &str) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return;
        }

        let Some(classified) = self.classify(line_number, line) else {
            return;
        };

        let record = match classified.record_type {
            RecordType::Comment => HeaderRecord::Comment(classified.rest.to_string()),
            record_type => {
                if !classified.separated && !classified.rest.is_empty() {
                    self.report_at(
                        DiagnosticKind::MalformedField,
                        format!("missing tab after {record_type}"),
                        line_number,
                        line,
                    );
                }
                if record_type == RecordType::Header
                    && !self.records.is_empty()
                    && !self.seen(RecordType::Header)
                {
                    self.report_at(
                        DiagnosticKind::MisplacedHeaderLine,
                        "@HD must be the first line of the header".to_string(),
                        line_number,
                        line,
                    );
                }

                let attributes =
                    self.parse_fields(record_type, classified.rest, line_number, line);
                self.check_required(record_type, &attributes, line_number, line);
                match HeaderRecord::from_attributes(record_type, attributes) {
                    Some(record) => record,
                    None => return,
                }
            }
        };

        self.records.push(record);
        self.sources.push((line_number, line.to_string()));
    }

    /// Loose step: find the record type, ignoring case.
    fn classify<'l>(&mut self, line_number: usize, line: &'l str) -> Option<ClassifiedLine<'l>> {
        let Some(body) = line.strip_prefix(HEADER_LINE_START) else {
            self.report_at(
                DiagnosticKind::UnrecognizedRecordType,
                "header line does not start with @".to_string(),
                line_number,
                line,
            );
            return None;
        };

        let (code, rest, separated) = match body.split_once(FIELD_SEPARATOR) {
            Some((code, rest)) => (code, rest, true),
            None => {
                let split = body
                    .char_indices()
                    .nth(2)
                    .map_or(body.len(), |(idx, _)| idx);
                let (code, rest) = body.split_at(split);
                (code, rest, false)
            }
        };

        match RecordType::classify(code) {
            Some(record_type) => Some(ClassifiedLine {
                record_type,
                rest,
                separated,
            }),
            None => {
                self.report_at(
                    DiagnosticKind::UnrecognizedRecordType,
                    code.to_string(),
                    line_number,
                    line,
                );
                None
            }
        }
    }

    /// Strict step: split `TAG:VALUE` fields, keeping tags and values verbatim.
    fn parse_fields(
        &mut self,
        record_type: RecordType,
        rest: &str,
        line_number: usize,
        line: &str,
    ) -> AttributeStore {
        let mut attributes = AttributeStore::new();
        if rest.is_empty() {
            return attributes;
        }

        for token in rest.split(FIELD_SEPARATOR) {
            let Some((tag, value)) = token.split_once(TAG_VALUE_SEPARATOR) else {
                let detail = if token.is_empty() {
                    "empty field".to_string()
                } else {
                    format!("Not a tag-value pair: {token}")
                };
                self.report_at(DiagnosticKind::MalformedField, detail, line_number, line);
                continue;
            };

            if !is_valid_tag(tag) {
                self.report_at(
                    DiagnosticKind::MalformedField,
                    format!("invalid tag '{tag}' in {token}"),
                    line_number,
                    line,
                );
                continue;
            }

            if let Some(existing) = attributes.get(tag) {
                let detail = format!("{record_type} {tag}:{value} clashes with {tag}:{existing}");
                self.report_at(DiagnosticKind::DuplicateTag, detail, line_number, line);
                continue;
            }

            if let Some(problem) = check_value(record_type, tag, value) {
                self.report_at(DiagnosticKind::InvalidFieldValue, problem, line_number, line);
            }

            attributes.set(tag, value);
        }

        attributes
    }

    fn check_required(
        &mut self,
        record_type: RecordType,
        attributes: &AttributeStore,
        line_number: usize,
        line: &str,
    ) {
        for tag in required_tags(record_type) {
            if !attributes.contains(tag) {
                self.report_at(
                    DiagnosticKind::MissingRequiredField,
                    format!("{record_type} line missing {tag} tag"),
                    line_number,
                    line,
                );
            }
        }
    }

    /// Cross-record checks, run once every line has been seen.
    fn finish(mut self) -> SamHeader {
        let records = std::mem::take(&mut self.records);
        let sources = std::mem::take(&mut self.sources);

        let mut found = Vec::new();
        let mut seen_header = false;
        let mut first_seen: HashMap<(RecordType, &str), usize> = HashMap::new();

        for (record, (line_number, line)) in records.iter().zip(&sources) {
            let record_type = record.record_type();
            if record_type == RecordType::Header {
                if seen_header {
                    found.push(
                        ValidationDiagnostic::new(
                            DiagnosticKind::DuplicateUniqueKey,
                            "more than one @HD line",
                        )
                        .at_line(*line_number, line.as_str()),
                    );
                }
                seen_header = true;
                continue;
            }

            let (Some(tag), Some(key)) = (record_type.unique_key_tag(), record.unique_key()) else {
                continue;
            };
            if let Some(first) = first_seen.get(&(record_type, key)) {
                found.push(
                    ValidationDiagnostic::new(
                        DiagnosticKind::DuplicateUniqueKey,
                        format!("{record_type} {tag}:{key} already defined on line {first}"),
                    )
                    .at_line(*line_number, line.as_str()),
                );
            } else {
                first_seen.insert((record_type, key), *line_number);
            }
        }

        let program_ids: HashSet<&str> = records
            .iter()
            .filter(|r| r.record_type() == RecordType::Program)
            .filter_map(HeaderRecord::unique_key)
            .collect();
        for (record, (line_number, line)) in records.iter().zip(&sources) {
            if let HeaderRecord::Program(attrs) = record {
                if let Some(pp) = attrs.get(PREVIOUS_PROGRAM_TAG) {
                    if !program_ids.contains(pp) {
                        found.push(
                            ValidationDiagnostic::new(
                                DiagnosticKind::UnknownProgramReference,
                                format!("PP:{pp} does not match any @PG ID"),
                            )
                            .at_line(*line_number, line.as_str()),
                        );
                    }
                }
            }
        }

        for diagnostic in found {
            self.report(diagnostic);
        }

        debug!(records = records.len(), "Decoded SAM text header");
        SamHeader::from_records(records)
    }
}
