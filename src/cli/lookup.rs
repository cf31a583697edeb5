use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::dictionary::{SequenceDictionary, SequenceEntry};
use crate::parsing::diagnostics::ValidationStringency;
use crate::parsing::input::decode_path;
use crate::parsing::sam::SamTextHeaderCodec;

#[derive(Args)]
pub struct LookupArgs {
    /// Input file (SAM, BAM, gzipped SAM, or .dict)
    /// Use '-' for stdin (expects header text)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Sequence names to look up (exact, case-sensitive)
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Execute lookup subcommand
///
/// Names that are not in the dictionary are reported, not treated as errors.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: LookupArgs,
    format: OutputFormat,
    stringency: ValidationStringency,
    verbose: bool,
) -> anyhow::Result<()> {
    let codec = SamTextHeaderCodec::with_stringency(stringency);
    let outcome = decode_path(&args.input, &codec)?;
    let dictionary = outcome.header.sequence_dictionary();

    if verbose {
        eprintln!(
            "Sequence dictionary has {} entries ({} diagnostics on input)",
            dictionary.len(),
            outcome.diagnostics.len()
        );
    }

    let hits: Vec<(&str, Option<(usize, &SequenceEntry)>)> = args
        .names
        .iter()
        .map(|name| (name.as_str(), find(&dictionary, name)))
        .collect();

    match format {
        OutputFormat::Text => print_text_hits(&hits),
        OutputFormat::Json => print_json_hits(&hits)?,
        OutputFormat::Tsv => print_tsv_hits(&hits),
    }

    Ok(())
}

fn find<'a>(dictionary: &'a SequenceDictionary, name: &str) -> Option<(usize, &'a SequenceEntry)> {
    let index = dictionary.index_of(name)?;
    dictionary.get(name).map(|entry| (index, entry))
}

fn print_text_hits(hits: &[(&str, Option<(usize, &SequenceEntry)>)]) {
    for (name, hit) in hits {
        match hit {
            Some((index, entry)) => {
                let length = entry
                    .length()
                    .map_or_else(|| "?".to_string(), |l| l.to_string());
                println!("{name}: index {index}, length {length}");
                if let Some(md5) = entry.normalized_md5() {
                    println!("  M5: {md5}");
                }
                let aliases = entry.alternative_names();
                if !aliases.is_empty() {
                    println!("  AN: {}", aliases.join(", "));
                }
                println!("  TP: {}", entry.topology());
            }
            None => println!("{name}: not found"),
        }
    }
}

fn print_json_hits(hits: &[(&str, Option<(usize, &SequenceEntry)>)]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = hits
        .iter()
        .map(|(name, hit)| match hit {
            Some((index, entry)) => serde_json::json!({
                "name": name,
                "found": true,
                "index": index,
                "length": entry.length(),
                "md5": entry.normalized_md5(),
                "alternative_names": entry.alternative_names(),
                "topology": entry.topology(),
                "attributes": entry.attributes(),
            }),
            None => serde_json::json!({
                "name": name,
                "found": false,
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_hits(hits: &[(&str, Option<(usize, &SequenceEntry)>)]) {
    println!("name\tfound\tindex\tlength\tmd5");
    for (name, hit) in hits {
        match hit {
            Some((index, entry)) => println!(
                "{}\ttrue\t{}\t{}\t{}",
                name,
                index,
                entry.length().map(|l| l.to_string()).unwrap_or_default(),
                entry.normalized_md5().unwrap_or_default()
            ),
            None => println!("{name}\tfalse\t\t\t"),
        }
    }
}
