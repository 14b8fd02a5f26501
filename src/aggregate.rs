//! Corpus-wide construction counts
//!
//! The [`Aggregator`] is the single accumulator threaded through a corpus run.
//! It is mutated once per accepted tree and then handed, read-only, to the
//! scorer and the report writer.
//!
//! Mappings from a pattern to an identifier (and from narrow to broad pattern)
//! are last-write-wins: when a pattern string repeats, the most recent tree
//! becomes its representative instance.

use crate::pattern::PatternPair;
use crate::psd::TreeRecord;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    /// Narrow pattern -> number of accepted trees
    pattern_counts: FxHashMap<String, usize>,
    /// Narrow tag -> occurrences across all accepted trees, never pruned
    element_counts: FxHashMap<String, usize>,
    narrow_ids: FxHashMap<String, String>,
    broad_ids: FxHashMap<String, String>,
    narrow_to_broad: FxHashMap<String, String>,
    id_to_file: FxHashMap<String, String>,
    sentence_counts: FxHashMap<String, usize>,
    file_names: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a corpus file before its trees are added
    pub fn begin_file(&mut self, file_name: &str) {
        self.file_names.push(file_name.to_string());
    }

    /// Record how many sentence roots a file contained
    pub fn record_sentences(&mut self, file_name: &str, sentences: usize) {
        *self
            .sentence_counts
            .entry(file_name.to_string())
            .or_default() += sentences;
    }

    /// Add a closed tree. Returns false (and changes nothing) if its narrow
    /// pattern is a single symbol or a single repeated symbol.
    pub fn add_tree(&mut self, record: &TreeRecord) -> bool {
        self.add_patterns(&record.source, &record.id, &record.patterns)
    }

    pub fn add_patterns(&mut self, file_name: &str, id: &str, patterns: &PatternPair) -> bool {
        if !patterns.is_informative() {
            return false;
        }
        let narrow = patterns.narrow_key();
        let broad = patterns.broad_key();

        self.id_to_file.insert(id.to_string(), file_name.to_string());
        self.narrow_ids.insert(narrow.clone(), id.to_string());
        self.broad_ids.insert(broad.clone(), id.to_string());
        self.narrow_to_broad.insert(narrow.clone(), broad);

        // every occurrence counts, duplicates within a tree included
        for element in &patterns.narrow {
            *self.element_counts.entry(element.clone()).or_default() += 1;
        }
        *self.pattern_counts.entry(narrow).or_default() += 1;
        true
    }

    /// Occurrence count of a narrow pattern
    pub fn count(&self, narrow: &str) -> usize {
        self.pattern_counts.get(narrow).copied().unwrap_or(0)
    }

    /// All narrow patterns with their occurrence counts, in no particular order
    pub fn pattern_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.pattern_counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct narrow patterns
    pub fn num_patterns(&self) -> usize {
        self.pattern_counts.len()
    }

    pub fn element_counts(&self) -> &FxHashMap<String, usize> {
        &self.element_counts
    }

    pub fn element_count(&self, element: &str) -> usize {
        self.element_counts.get(element).copied().unwrap_or(0)
    }

    /// Sum of all element occurrences recorded in the corpus
    pub fn element_total(&self) -> usize {
        self.element_counts.values().sum()
    }

    /// Representative identifier of a narrow pattern
    pub fn id_for(&self, narrow: &str) -> Option<&str> {
        self.narrow_ids.get(narrow).map(String::as_str)
    }

    /// Representative identifier of a broad pattern
    pub fn broad_id(&self, broad: &str) -> Option<&str> {
        self.broad_ids.get(broad).map(String::as_str)
    }

    pub fn broad_for(&self, narrow: &str) -> Option<&str> {
        self.narrow_to_broad.get(narrow).map(String::as_str)
    }

    /// File stem a sentence identifier was read from
    pub fn file_for(&self, id: &str) -> Option<&str> {
        self.id_to_file.get(id).map(String::as_str)
    }

    pub fn sentence_count(&self, file_name: &str) -> usize {
        self.sentence_counts.get(file_name).copied().unwrap_or(0)
    }

    /// File stems in processing order
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }
}
