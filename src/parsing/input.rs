//! Line sources for the header codec.
//!
//! - **SAM text** (`.sam`, `.dict`, `.txt`, no extension): leading `@` lines are decoded;
//!   reading stops at the first alignment record
//! - **gzip SAM** (`.sam.gz`, `.gz`, `.bgz`): same, through `flate2`
//! - **BAM** (`.bam`): the header is read with noodles and re-rendered as text
//! - **stdin** (`-`): treated as SAM text

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::parsing::sam::{DecodeOutcome, ParseError, SamTextHeaderCodec};

/// Kind of input a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Sam,
    GzippedSam,
    Bam,
}

impl InputFormat {
    /// Detect the input kind from the file extension
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("sam" | "dict" | "txt" | "hdr") | None => Ok(Self::Sam),
            Some("gz" | "bgz") => Ok(Self::GzippedSam),
            Some("bam") => Ok(Self::Bam),
            Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Decode the header of the file at `path` (`-` for stdin)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if a
/// BAM header cannot be read, or `ParseError::UnsupportedFormat` for unknown
/// extensions.
pub fn decode_path(path: &Path, codec: &SamTextHeaderCodec) -> Result<DecodeOutcome, ParseError> {
    if path == Path::new("-") {
        debug!("Reading header text from stdin");
        return decode_sam_reader(io::stdin().lock(), codec);
    }

    let format = InputFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "Reading header");

    match format {
        InputFormat::Sam => decode_sam_reader(BufReader::new(File::open(path)?), codec),
        InputFormat::GzippedSam => {
            let decoder = MultiGzDecoder::new(File::open(path)?);
            decode_sam_reader(BufReader::new(decoder), codec)
        }
        InputFormat::Bam => {
            let text = read_bam_header_text(path)?;
            Ok(codec.decode_bytes(text.split(|&b| b == b'\n')))
        }
    }
}

/// Decode the leading header lines of SAM text, stopping at the first alignment line
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails. Bytes that are not UTF-8 are a
/// diagnostic, not an error.
pub fn decode_sam_reader<R: BufRead>(
    reader: R,
    codec: &SamTextHeaderCodec,
) -> Result<DecodeOutcome, ParseError> {
    let mut io_error = None;
    let lines = reader
        .split(b'\n')
        .map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                io_error = Some(e);
                None
            }
        })
        .take_while(|line| {
            line.starts_with(b"@") || line.iter().all(u8::is_ascii_whitespace)
        });

    let outcome = codec.decode_bytes(lines);
    match io_error {
        Some(e) => Err(ParseError::Io(e)),
        None => Ok(outcome),
    }
}

/// Read a BAM header with noodles and render it as SAM header text (not
/// necessarily UTF-8)
fn read_bam_header_text(path: &Path) -> Result<Vec<u8>, ParseError> {
    use noodles::{bam, sam};

    let mut reader = File::open(path).map(bam::io::Reader::new)?;
    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    let mut writer = sam::io::Writer::new(Vec::new());
    writer
        .write_header(&header)
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::diagnostics::DiagnosticKind;
    use std::io::Write;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.sam")).unwrap(), InputFormat::Sam);
        assert_eq!(InputFormat::from_path(Path::new("a.SAM")).unwrap(), InputFormat::Sam);
        assert_eq!(InputFormat::from_path(Path::new("ref.dict")).unwrap(), InputFormat::Sam);
        assert_eq!(InputFormat::from_path(Path::new("header")).unwrap(), InputFormat::Sam);
        assert_eq!(
            InputFormat::from_path(Path::new("a.sam.gz")).unwrap(),
            InputFormat::GzippedSam
        );
        assert_eq!(InputFormat::from_path(Path::new("a.bam")).unwrap(), InputFormat::Bam);
        assert!(matches!(
            InputFormat::from_path(Path::new("a.cram")),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_sam_reader_stops_at_alignments() {
        let text = "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:100\nread1\t0\tchr1\t1\t60\t4M\t*\t0\t0\tACGT\t*\n@CO\tnever read\n";
        let outcome = decode_sam_reader(text.as_bytes(), &SamTextHeaderCodec::new()).unwrap();
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.header.len(), 2);
    }

    #[test]
    fn test_decode_sam_reader_keeps_going_after_bad_bytes() {
        let bytes: &[u8] = b"@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:10\n@CO\tcaf\xE9\n@SQ\tSN:chr2\tLN:20\nread1\t4\t*\n";
        let outcome = decode_sam_reader(bytes, &SamTextHeaderCodec::new()).unwrap();

        assert_eq!(outcome.header.len(), 4);
        assert_eq!(outcome.header.sequence_dictionary().len(), 2);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::InvalidEncoding);
        assert_eq!(outcome.diagnostics[0].line_number, Some(3));
    }

    #[test]
    fn test_decode_path_gzipped() {
        let mut file = tempfile::Builder::new().suffix(".sam.gz").tempfile().unwrap();
        {
            let mut encoder =
                flate2::write::GzEncoder::new(file.as_file_mut(), flate2::Compression::default());
            encoder.write_all(b"@hd\tVN:1.6\n@sq\tSN:chr1\tLN:100\n").unwrap();
            encoder.finish().unwrap();
        }

        let outcome = decode_path(file.path(), &SamTextHeaderCodec::new()).unwrap();
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.header.get_sequence("chr1").is_some());
    }

    #[test]
    fn test_decode_path_missing_file() {
        let result = decode_path(Path::new("/nonexistent/header.sam"), &SamTextHeaderCodec::new());
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
