//! End-to-end runs of the constructicon binary over a throwaway corpus

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MALORY: &str = "\
( (IP-MAT (ADVP-TMP (ADV Thenne))
\t(BED was)
\t(NP-SBJ (D the) (N kyng))
\t(ID CMMALORY,2.45))

( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t(ID CMMALORY,2.46))

( (IP-MAT (NP-SBJ (PRO she))
\t(VBD answerde)
\t(ID CMMALORY,2.47))
";

fn constructicon_bin() -> &'static str {
    env!("CARGO_BIN_EXE_constructicon")
}

fn setup_corpus() -> (TempDir, TempDir) {
    let corpus = tempfile::tempdir().unwrap();
    fs::write(corpus.path().join("cmmalory.m4.psd"), MALORY).unwrap();
    let out = tempfile::tempdir().unwrap();
    (corpus, out)
}

fn run(corpus: &Path, out: &Path, extra_args: &[&str]) -> Output {
    Command::new(constructicon_bin())
        .arg(corpus)
        .arg(out)
        .args(extra_args)
        .output()
        .unwrap()
}

fn read_report(out: &Path, prefix: &str) -> String {
    let path = fs::read_dir(out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|p| {
            p.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(prefix)
        })
        .unwrap_or_else(|| panic!("no report starting with {}", prefix));
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_writes_both_reports() {
    let (corpus, out) = setup_corpus();
    let output = run(corpus.path(), out.path(), &["1"]);
    assert!(output.status.success(), "{:?}", output);

    let aggregated = read_report(out.path(), "treenet_aggregated_");
    let lines: Vec<&str> = aggregated.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("ADVP-TMP BE NP-SBJ\tADVP-TMP BED NP-SBJ-D-N\t1\t"));
    assert!(lines[2].starts_with("NP-SBJ VB\tNP-SBJ VBD\t2\t"));

    let full = read_report(out.path(), "treenet_full_data_");
    let row: Vec<&str> = full.lines().nth(2).unwrap().split('\t').collect();
    assert_eq!(&row[4..], &["CMMALORY,2.47", "1470", "Romance", "West Midlands"]);
}

#[test]
fn test_default_threshold_prunes_rare_constructions() {
    let (corpus, out) = setup_corpus();
    let output = run(corpus.path(), out.path(), &[]);
    assert!(output.status.success());

    let aggregated = read_report(out.path(), "treenet_aggregated_");
    assert_eq!(aggregated.lines().count(), 1);
}

#[test]
fn test_semicolon_separator() {
    let (corpus, out) = setup_corpus();
    let output = run(corpus.path(), out.path(), &["2", ";"]);
    assert!(output.status.success());

    let aggregated = read_report(out.path(), "treenet_aggregated_");
    assert!(aggregated.starts_with("cx_broad;cx_narrow;freq;rel_freq;specific_correlation\n"));
    assert!(aggregated.contains("NP-SBJ VB;NP-SBJ VBD;2;1;"));
}

#[test]
fn test_rejects_bad_separator_before_writing() {
    let (corpus, out) = setup_corpus();
    let output = run(corpus.path(), out.path(), &["5", ","]);
    assert!(!output.status.success());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_rejects_empty_corpus_before_writing() {
    let corpus = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let output = run(corpus.path(), out.path(), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no .psd parsed corpus files"), "{}", stderr);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
