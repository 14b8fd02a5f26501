//! Python bindings for constructicon
//!
//! This module provides PyO3-based Python bindings for the Rust core.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;

use crate::corpus::{Corpus, CorpusError};
use crate::pattern;
use crate::score;
use crate::tags;

/// Convert CorpusError to Python exception
impl From<CorpusError> for PyErr {
    fn from(err: CorpusError) -> PyErr {
        match err {
            CorpusError::Pattern(e) => PyValueError::new_err(format!("Pattern error: {}", e)),
            e @ CorpusError::NoFiles(_) => PyValueError::new_err(e.to_string()),
            e @ CorpusError::Read { .. } => PyIOError::new_err(e.to_string()),
        }
    }
}

/// Keep only the core category and first qualifier of a tag.
///
/// Example:
///     strip_subtype("NP-SBJ-1-D-N")  # "NP-SBJ"
#[pyfunction]
fn strip_subtype(tag: &str) -> String {
    tags::strip_subtype(tag)
}

/// Replace a trailing single-digit co-index with "-n".
#[pyfunction]
fn genericize_coindex(tag: &str) -> String {
    tags::genericize_coindex(tag)
}

/// Extract the (narrow, broad) symbol lists from the lines of one tree.
///
/// Args:
///     lines: Raw tree lines, starting with the IP-MAT root line
///
/// Returns:
///     Tuple of two lists of strings
#[pyfunction]
fn extract_patterns(lines: Vec<String>) -> (Vec<String>, Vec<String>) {
    let patterns = pattern::extract_patterns(&lines);
    (patterns.narrow, patterns.broad)
}

/// Relative frequency and total correlation of one construction.
///
/// Returns:
///     Tuple (relative_frequency, total_correlation); the correlation is None
///     when it is undefined
#[pyfunction]
fn total_correlation(
    pattern: &str,
    freq: usize,
    construction_total: usize,
    element_total: usize,
    element_counts: HashMap<String, usize>,
) -> (f64, Option<f64>) {
    let element_counts: FxHashMap<String, usize> = element_counts.into_iter().collect();
    score::total_correlation(
        pattern,
        freq,
        construction_total,
        element_total,
        &element_counts,
    )
}

/// Count and score the constructions of every .psd file in a directory.
///
/// Args:
///     corpus_dir: Directory containing .psd files
///     min_freq: Minimum construction frequency (default 5)
///
/// Returns:
///     Dict mapping narrow pattern to (broad pattern, frequency,
///     relative frequency, total correlation or None)
///
/// Raises:
///     ValueError: If no corpus files are found
///     IOError: If a corpus file cannot be read
#[pyfunction]
#[pyo3(signature = (corpus_dir, min_freq=score::DEFAULT_MIN_FREQ))]
fn count_constructions(
    corpus_dir: &str,
    min_freq: usize,
) -> PyResult<HashMap<String, (String, usize, f64, Option<f64>)>> {
    if min_freq == 0 {
        return Err(PyValueError::new_err("min_freq must be a positive integer"));
    }
    let aggregate = Corpus::from_dir(corpus_dir)?.aggregate()?;
    let scores = score::score(&aggregate, min_freq);
    Ok(scores
        .iter()
        .map(|(narrow, s)| {
            let broad = aggregate.broad_for(narrow).unwrap_or("").to_string();
            (
                narrow.to_string(),
                (broad, s.frequency, s.relative_frequency, s.total_correlation),
            )
        })
        .collect())
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn constructicon(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(strip_subtype, m)?)?;
    m.add_function(wrap_pyfunction!(genericize_coindex, m)?)?;
    m.add_function(wrap_pyfunction!(extract_patterns, m)?)?;
    m.add_function(wrap_pyfunction!(total_correlation, m)?)?;
    m.add_function(wrap_pyfunction!(count_constructions, m)?)?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;

    Ok(())
}
