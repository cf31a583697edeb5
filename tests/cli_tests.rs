//! Tests of the `sam-header` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const MESSY_HEADER: &str = "@hd\tVN:1.6\tSO:Coordinate\n\
@sq\tSN:chr1\tLN:248956422\n\
@SQ\tSN:chrM\tLN:16569\tTP:circular\n\
@RG\tID:rg1\tPL:illumina\tSM:NA12878\n\
@PG\tID:bwa\tPN:bwa\n\
@CO\tfrom the sequencer\n";

fn sam_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".sam").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn sam_header() -> Command {
    Command::cargo_bin("sam-header").unwrap()
}

#[test]
fn test_validate_clean_header() {
    let file = sam_file(MESSY_HEADER);

    sam_header()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 6"))
        .stdout(predicate::str::contains("Sort order: coordinate"))
        .stdout(predicate::str::contains("No problems found"));
}

#[test]
fn test_validate_reports_errors_and_fails() {
    let file = sam_file("@HD\tVN:1.6\n@XX\tfoo\n@SQ\tSN:chr1\n");

    sam_header()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unrecognized header record type: XX"))
        .stdout(predicate::str::contains("Missing required field"))
        .stderr(predicate::str::contains("2 error(s)"));
}

#[test]
fn test_validate_warnings_pass_unless_strict() {
    let file = sam_file("@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:0\n");

    sam_header()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"));

    sam_header()
        .args(["--stringency", "strict", "validate"])
        .arg(file.path())
        .assert()
        .failure();

    sam_header()
        .args(["--stringency", "silent", "validate"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found"));
}

#[test]
fn test_validate_json_output() {
    let file = sam_file("@HD\tVN:1.6\n@ZZ\n");

    let output = sam_header()
        .args(["--format", "json", "validate"])
        .arg(file.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"], 1);
    assert_eq!(json["records"]["HD"], 1);
    assert_eq!(json["diagnostics"][0]["kind"], "unrecognized_record_type");
    assert_eq!(json["diagnostics"][0]["line_number"], 2);
}

#[test]
fn test_validate_from_stdin() {
    sam_header()
        .args(["--format", "tsv", "validate", "-"])
        .write_stdin("@hd\tVN:1.0\tSO:unsorted\n@SQ\tSN:chr1\tLN:abc\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("severity\tkind\tline_number\tmessage\n"))
        .stdout(predicate::str::contains("WARNING\tInvalidFieldValue\t2\t"));
}

#[test]
fn test_validate_tolerates_latin1_bytes() {
    sam_header()
        .args(["validate", "-"])
        .write_stdin(&b"@HD\tVN:1.6\n@CO\tcaf\xE9\n@SQ\tSN:chr1\tLN:10\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 3"))
        .stdout(predicate::str::contains("WARNING: Line 2: Invalid UTF-8"));
}

#[test]
fn test_validate_missing_file() {
    sam_header()
        .args(["validate", "/nonexistent/header.sam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_normalize_canonicalizes_codes() {
    let file = sam_file(MESSY_HEADER);

    sam_header()
        .arg("normalize")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "@HD\tVN:1.6\tSO:Coordinate\n@SQ\tSN:chr1\tLN:248956422\n",
        ));
}

#[test]
fn test_normalize_rewrites_orders_to_file() {
    let file = sam_file(MESSY_HEADER);
    let out = tempfile::Builder::new().suffix(".sam").tempfile().unwrap();

    sam_header()
        .arg("normalize")
        .arg(file.path())
        .args(["--sort-order", "QUERYNAME", "--group-order", "query", "--drop-comments"])
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.starts_with("@HD\tVN:1.6\tSO:queryname\tGO:query\n"));
    assert!(!written.contains("@CO"));
}

#[test]
fn test_normalize_rejects_bad_sort_order() {
    let file = sam_file(MESSY_HEADER);

    sam_header()
        .arg("normalize")
        .arg(file.path())
        .args(["--sort-order", "sorted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid SO value 'sorted'"));
}

#[test]
fn test_normalize_rejects_tsv() {
    let file = sam_file(MESSY_HEADER);

    sam_header()
        .args(["--format", "tsv", "normalize"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format tsv is not supported"));
}

#[test]
fn test_lookup_prints_lowercase_md5() {
    let file = sam_file("@SQ\tSN:chrM\tLN:16569\tM5:C68F52674C9FB33AEF52DCF399755519\n");

    sam_header()
        .args(["--format", "tsv", "lookup"])
        .arg(file.path())
        .arg("chrM")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "chrM\ttrue\t0\t16569\tc68f52674c9fb33aef52dcf399755519",
        ));
}

#[test]
fn test_lookup() {
    let file = sam_file(MESSY_HEADER);

    sam_header()
        .arg("lookup")
        .arg(file.path())
        .args(["chrM", "chr2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chrM: index 1, length 16569"))
        .stdout(predicate::str::contains("TP: circular"))
        .stdout(predicate::str::contains("chr2: not found"));
}

#[test]
fn test_lookup_json() {
    let file = sam_file(MESSY_HEADER);

    let output = sam_header()
        .args(["--format", "json", "lookup"])
        .arg(file.path())
        .args(["chr1", "chrX"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json[0]["found"], true);
    assert_eq!(json[0]["length"], 248_956_422);
    assert_eq!(json[0]["topology"], "linear");
    assert_eq!(json[1]["found"], false);
}
