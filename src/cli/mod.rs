//! Command-line interface for sam-header.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **validate**: Decode a header and report every diagnostic
//! - **normalize**: Re-encode a header canonically, optionally rewriting `SO`/`GO`
//! - **lookup**: Look up sequence dictionary entries by name
//!
//! ## Usage
//!
//! ```text
//! # Validate the header of a SAM or BAM file
//! sam-header validate sample.bam
//!
//! # Pipe from samtools
//! samtools view -H sample.bam | sam-header validate -
//!
//! # JSON output for scripting
//! sam-header --format json validate sample.sam
//!
//! # Canonicalize record codes and mark the header as coordinate sorted
//! sam-header normalize sample.sam --sort-order coordinate -o fixed.sam
//!
//! # Look up contigs
//! sam-header lookup sample.sam chr1 chrM
//! ```

use clap::{Parser, Subcommand};

use crate::core::attributes::Vocabulary;
use crate::parsing::diagnostics::ValidationStringency;

pub mod lookup;
pub mod normalize;
pub mod validate;

#[derive(Parser)]
#[command(name = "sam-header")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Validate, normalize and query SAM text headers")]
#[command(
    long_about = "sam-header reads the header of a SAM/BAM file (or header text on stdin) with a tolerant decoder.\n\nRecord codes are recognised in any letter case, malformed fields are skipped, and every problem is reported as a diagnostic instead of aborting:\n- validate: list diagnostics, failing when any is an error\n- normalize: write the header back out in canonical form\n- lookup: query the sequence dictionary by name"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// How strictly problems are reported
    #[arg(short, long, global = true, value_enum, default_value = "lenient")]
    pub stringency: ValidationStringency,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report every problem in a header
    Validate(validate::ValidateArgs),

    /// Write a header back out in canonical form
    Normalize(normalize::NormalizeArgs),

    /// Look up sequences by name
    Lookup(lookup::LookupArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Parse a command-line value into a controlled vocabulary, ignoring case.
///
/// Unlike [`Vocabulary::from_name`], an unrecognised value is an error here:
/// on the command line a typo should not silently become `unknown`.
///
/// # Errors
///
/// Returns an error naming the accepted values.
pub fn parse_vocabulary<V: Vocabulary>(value: &str) -> anyhow::Result<V> {
    let parsed = V::from_name(value);
    if parsed == V::UNKNOWN && !V::UNKNOWN.canonical_name().eq_ignore_ascii_case(value) {
        let accepted: Vec<&str> = V::ALL.iter().map(|v| v.canonical_name()).collect();
        anyhow::bail!(
            "Invalid {} value '{}'; expected one of: {}",
            V::TAG,
            value,
            accepted.join(", ")
        );
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GroupOrder, SortOrder};

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!(parse_vocabulary::<SortOrder>("Coordinate").unwrap(), SortOrder::Coordinate);
        assert_eq!(parse_vocabulary::<SortOrder>("unknown").unwrap(), SortOrder::Unknown);
        assert_eq!(parse_vocabulary::<GroupOrder>("QUERY").unwrap(), GroupOrder::Query);

        let err = parse_vocabulary::<SortOrder>("coord").unwrap_err();
        assert!(err.to_string().contains("expected one of: unsorted, queryname, coordinate"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["sam-header", "-s", "strict", "validate", "in.sam"]).unwrap();
        assert_eq!(cli.stringency, ValidationStringency::Strict);
        assert!(matches!(cli.command, Commands::Validate(_)));
    }
}
