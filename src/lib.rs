//! Constructicon: construction frequency and association in parsed corpora
//!
//! Extracts sentence-level constituent patterns ("constructions") from
//! Penn-Helsinki style `.psd` treebanks, counts them, and scores each with its
//! relative frequency and total correlation.
//! Core implementation in Rust with optional Python bindings.

// Core modules (leaf-first)
pub mod tags; // Tag normalization
pub mod pattern; // Per-tree narrow/broad pattern extraction
pub mod psd; // Tree segmentation of .psd files
pub mod aggregate; // Corpus-wide counts
pub mod score; // Relative frequency and total correlation
pub mod corpus; // Corpus discovery and the aggregation pass
pub mod metadata; // Text date/genre/dialect tables
pub mod config; // Run configuration
pub mod report; // Delimited report output

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use aggregate::Aggregator;
pub use config::{ConfigError, RunConfig, Separator};
pub use corpus::{Corpus, CorpusError};
pub use pattern::{LineContribution, PatternPair, classify_line, extract_patterns};
pub use psd::{TreeReader, TreeRecord};
pub use report::{ReportError, ReportPaths, write_reports};
pub use score::{ConstructionScore, Scores, score, total_correlation};
