//! Delimited report output
//!
//! Two reports are written per run: an aggregated one with a row per retained
//! construction, and a full one that joins each construction's representative
//! sentence with its text metadata. Rows follow the lexical order of the
//! narrow pattern. Undefined correlations and unknown metadata are empty
//! fields.

use crate::aggregate::Aggregator;
use crate::config::Separator;
use crate::metadata;
use crate::score::Scores;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const AGGREGATED_HEADER: &[&str] =
    &["cx_broad", "cx_narrow", "freq", "rel_freq", "specific_correlation"];

pub const FULL_HEADER: &[&str] = &[
    "cx_broad",
    "cx_narrow",
    "rel_freq",
    "specific_correlation",
    "id",
    "year",
    "genre",
    "dialect",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Paths of the reports written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub aggregated: PathBuf,
    pub full: PathBuf,
}

impl ReportPaths {
    /// Report paths inside `out_dir` for a run started at `timestamp`
    pub fn new(out_dir: &Path, timestamp: &str) -> Self {
        Self {
            aggregated: out_dir.join(format!("treenet_aggregated_{}.txt", timestamp)),
            full: out_dir.join(format!("treenet_full_data_{}.txt", timestamp)),
        }
    }
}

/// Local time formatted for report file names
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H_%M").to_string()
}

fn format_correlation(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<W: Write>(out: &mut W, sep: Separator, fields: &[&str]) -> io::Result<()> {
    writeln!(out, "{}", fields.join(sep.as_str()))
}

/// Write the aggregated report: one row per retained construction
pub fn write_aggregated<W: Write>(
    out: &mut W,
    sep: Separator,
    aggregate: &Aggregator,
    scores: &Scores,
) -> io::Result<()> {
    write_row(out, sep, AGGREGATED_HEADER)?;
    for (narrow, score) in scores.iter() {
        let broad = aggregate.broad_for(narrow).unwrap_or("");
        let freq = score.frequency.to_string();
        let rel_freq = score.relative_frequency.to_string();
        let correlation = format_correlation(score.total_correlation);
        write_row(out, sep, &[broad, narrow, &freq, &rel_freq, &correlation])?;
    }
    Ok(())
}

/// Write the full report: each construction with its representative sentence
/// identifier and that text's year, genre and dialect
pub fn write_full<W: Write>(
    out: &mut W,
    sep: Separator,
    aggregate: &Aggregator,
    scores: &Scores,
) -> io::Result<()> {
    write_row(out, sep, FULL_HEADER)?;
    for (narrow, score) in scores.iter() {
        let broad = aggregate.broad_for(narrow).unwrap_or("");
        let id = aggregate.id_for(narrow).unwrap_or("");
        let text = aggregate.file_for(id).and_then(metadata::lookup);
        let year = text.map(|t| t.year.to_string()).unwrap_or_default();
        let rel_freq = score.relative_frequency.to_string();
        let correlation = format_correlation(score.total_correlation);
        write_row(
            out,
            sep,
            &[
                broad,
                narrow,
                &rel_freq,
                &correlation,
                id,
                &year,
                text.map(|t| t.genre).unwrap_or(""),
                text.map(|t| t.dialect).unwrap_or(""),
            ],
        )?;
    }
    Ok(())
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), ReportError> {
    let to_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(to_error)?);
    write(&mut out).map_err(to_error)?;
    out.flush().map_err(to_error)
}

/// Write both reports into `out_dir`
pub fn write_reports(
    out_dir: &Path,
    timestamp: &str,
    sep: Separator,
    aggregate: &Aggregator,
    scores: &Scores,
) -> Result<ReportPaths, ReportError> {
    if !out_dir.is_dir() {
        return Err(ReportError::MissingOutputDir(out_dir.to_path_buf()));
    }
    let paths = ReportPaths::new(out_dir, timestamp);
    write_file(&paths.aggregated, |out| {
        write_aggregated(out, sep, aggregate, scores)
    })?;
    write_file(&paths.full, |out| write_full(out, sep, aggregate, scores))?;
    Ok(paths)
}
