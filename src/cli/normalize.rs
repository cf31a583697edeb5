use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::cli::{parse_vocabulary, OutputFormat};
use crate::core::types::{GroupOrder, SortOrder};
use crate::parsing::diagnostics::ValidationStringency;
use crate::parsing::input::decode_path;
use crate::parsing::sam::SamTextHeaderCodec;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Input file (SAM, BAM, gzipped SAM, or .dict)
    /// Use '-' for stdin (expects header text)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write the header here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set @HD SO (unsorted, queryname, coordinate, unknown)
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Set @HD GO (none, query, reference)
    #[arg(long)]
    pub group_order: Option<String>,

    /// Drop @CO lines
    #[arg(long)]
    pub drop_comments: bool,
}

/// Execute normalize subcommand
///
/// With `--format json` the header model is written as JSON; with `--format text`
/// as canonical SAM header text. A header has no tabular form, so `--format tsv`
/// is rejected.
///
/// # Errors
///
/// Returns an error for `--format tsv`, if the input cannot be read, an order
/// value is not recognised, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: NormalizeArgs,
    format: OutputFormat,
    stringency: ValidationStringency,
    verbose: bool,
) -> anyhow::Result<()> {
    // Reject bad option values before touching the input
    if matches!(format, OutputFormat::Tsv) {
        anyhow::bail!("normalize writes SAM text or JSON; --format tsv is not supported");
    }
    let sort_order = args
        .sort_order
        .as_deref()
        .map(parse_vocabulary::<SortOrder>)
        .transpose()?;
    let group_order = args
        .group_order
        .as_deref()
        .map(parse_vocabulary::<GroupOrder>)
        .transpose()?;

    let codec = SamTextHeaderCodec::with_stringency(stringency);
    let (mut header, diagnostics) = decode_path(&args.input, &codec)?.into_parts();

    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }

    if let Some(order) = sort_order {
        header.set_sort_order(order);
    }
    if let Some(order) = group_order {
        header.set_group_order(order);
    }
    if args.drop_comments {
        header
            .records_mut()
            .retain(|r| r.comment().is_none());
    }

    if verbose {
        eprintln!(
            "Writing {} header records ({} diagnostics on input)",
            header.len(),
            diagnostics.len()
        );
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &header)?;
            writeln!(writer)?;
        }
        OutputFormat::Text | OutputFormat::Tsv => codec.encode(&header, &mut writer)?,
    }
    writer.flush()?;

    Ok(())
}
