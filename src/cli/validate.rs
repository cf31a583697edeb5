use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::record::RecordType;
use crate::parsing::diagnostics::ValidationStringency;
use crate::parsing::input::decode_path;
use crate::parsing::sam::{DecodeOutcome, SamTextHeaderCodec};

#[derive(Args)]
pub struct ValidateArgs {
    /// Input file (SAM, BAM, gzipped SAM, or .dict)
    /// Use '-' for stdin (expects header text)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Only print the first N diagnostics (all are still counted)
    #[arg(short = 'n', long)]
    pub max_diagnostics: Option<usize>,
}

/// Execute validate subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, or if any diagnostic is an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: ValidateArgs,
    format: OutputFormat,
    stringency: ValidationStringency,
    verbose: bool,
) -> anyhow::Result<()> {
    let codec = SamTextHeaderCodec::with_stringency(stringency);
    let outcome = decode_path(&args.input, &codec)?;

    if verbose {
        eprintln!(
            "Decoded {} header records from {}",
            outcome.header.len(),
            args.input.display()
        );
    }

    let shown = args.max_diagnostics.unwrap_or(usize::MAX);
    match format {
        OutputFormat::Text => print_text_report(&args, &outcome, shown),
        OutputFormat::Json => print_json_report(&args, &outcome, shown)?,
        OutputFormat::Tsv => print_tsv_report(&outcome, shown),
    }

    if outcome.has_errors() {
        anyhow::bail!(
            "{} error(s) found in {}",
            outcome.error_count(),
            args.input.display()
        );
    }

    Ok(())
}

fn record_counts(outcome: &DecodeOutcome) -> Vec<(RecordType, usize)> {
    RecordType::ALL
        .iter()
        .map(|&t| (t, outcome.header.records_of(t).count()))
        .collect()
}

fn print_text_report(args: &ValidateArgs, outcome: &DecodeOutcome, shown: usize) {
    let header = &outcome.header;

    println!("Header: {}", args.input.display());
    let counts: Vec<String> = record_counts(outcome)
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(t, n)| format!("{n} {t}"))
        .collect();
    println!("  Records: {} ({})", header.len(), counts.join(", "));
    if let Some(version) = header.version() {
        println!("  Version: {version}");
    }
    println!("  Sort order: {}", header.sort_order());
    println!("  Group order: {}", header.group_order());

    let dictionary = header.sequence_dictionary();
    if !dictionary.is_empty() {
        println!(
            "  Sequences: {} ({} bp)",
            dictionary.len(),
            dictionary.total_length()
        );
    }

    println!();
    if outcome.diagnostics.is_empty() {
        println!("No problems found");
        return;
    }

    println!(
        "Diagnostics: {} error(s), {} warning(s)",
        outcome.error_count(),
        outcome.warning_count()
    );
    for diagnostic in outcome.diagnostics.iter().take(shown) {
        println!("  {diagnostic}");
    }
    let hidden = outcome.diagnostics.len().saturating_sub(shown);
    if hidden > 0 {
        println!("  ... and {hidden} more");
    }
}

fn print_json_report(
    args: &ValidateArgs,
    outcome: &DecodeOutcome,
    shown: usize,
) -> anyhow::Result<()> {
    let header = &outcome.header;
    let counts: serde_json::Map<String, serde_json::Value> = record_counts(outcome)
        .into_iter()
        .map(|(t, n)| (t.code().to_string(), serde_json::json!(n)))
        .collect();

    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "valid": !outcome.has_errors(),
        "version": header.version(),
        "sort_order": header.sort_order(),
        "group_order": header.group_order(),
        "records": counts,
        "sequences": header.sequence_dictionary().len(),
        "errors": outcome.error_count(),
        "warnings": outcome.warning_count(),
        "diagnostics": outcome.diagnostics.iter().take(shown).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(outcome: &DecodeOutcome, shown: usize) {
    println!("severity\tkind\tline_number\tmessage");
    for d in outcome.diagnostics.iter().take(shown) {
        println!(
            "{}\t{:?}\t{}\t{}",
            d.severity,
            d.kind,
            d.line_number.map(|n| n.to_string()).unwrap_or_default(),
            d.message.replace('\t', " ")
        );
    }
}
