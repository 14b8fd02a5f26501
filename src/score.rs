//! Relative frequency and total correlation of constructions
//!
//! Total correlation is the multivariate generalization of pointwise mutual
//! information (van de Cruys 2011): the log ratio between a construction's
//! relative frequency and the product of its elements' probabilities under an
//! independence assumption,
//!
//! ```text
//! TC(x1 .. xn) = ln( P(x1 .. xn) / (P(x1) * .. * P(xn)) )
//! ```
//!
//! Element probabilities use the corpus-wide element counts, including those
//! of constructions later pruned by the frequency threshold.

use crate::aggregate::Aggregator;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Default minimum number of occurrences for a construction to be scored
pub const DEFAULT_MIN_FREQ: usize = 5;

/// Scores for one retained construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructionScore {
    pub frequency: usize,
    pub relative_frequency: f64,
    /// `None` when the log ratio is undefined (a zero-probability element)
    pub total_correlation: Option<f64>,
}

/// Scored constructions keyed by narrow pattern, in lexical order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    constructions: BTreeMap<String, ConstructionScore>,
}

impl Scores {
    pub fn get(&self, narrow: &str) -> Option<&ConstructionScore> {
        self.constructions.get(narrow)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstructionScore)> {
        self.constructions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of retained construction types
    pub fn types(&self) -> usize {
        self.constructions.len()
    }

    /// Number of retained construction tokens
    pub fn tokens(&self) -> usize {
        self.constructions.values().map(|s| s.frequency).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.constructions.is_empty()
    }
}

/// Score every construction seen at least `min_freq` times
pub fn score(aggregate: &Aggregator, min_freq: usize) -> Scores {
    let retained: Vec<(&str, usize)> = aggregate
        .pattern_counts()
        .filter(|&(_, count)| count >= min_freq)
        .collect();

    let construction_total: usize = retained.iter().map(|&(_, count)| count).sum();
    let element_total = aggregate.element_total();
    let element_counts = aggregate.element_counts();

    let constructions = retained
        .into_iter()
        .map(|(pattern, frequency)| {
            let (relative_frequency, total_correlation) = total_correlation(
                pattern,
                frequency,
                construction_total,
                element_total,
                element_counts,
            );
            let score = ConstructionScore {
                frequency,
                relative_frequency,
                total_correlation,
            };
            (pattern.to_string(), score)
        })
        .collect();

    Scores { constructions }
}

/// Relative frequency and total correlation of one construction.
///
/// `pattern` is the space-joined narrow pattern, `frequency` its count,
/// `construction_total` the summed count of all retained constructions and
/// `element_total` the summed count of all elements. Elements missing from
/// `element_counts` have probability zero, which makes the correlation
/// undefined.
pub fn total_correlation(
    pattern: &str,
    frequency: usize,
    construction_total: usize,
    element_total: usize,
    element_counts: &FxHashMap<String, usize>,
) -> (f64, Option<f64>) {
    let relative_frequency = frequency as f64 / construction_total as f64;

    let independence = pattern
        .split_whitespace()
        .map(|element| {
            let count = element_counts.get(element).copied().unwrap_or(0);
            count as f64 / element_total as f64
        })
        .fold(1.0, |acc, p| acc * p);

    let ratio = relative_frequency / independence;
    let correlation = (independence > 0.0 && ratio > 0.0).then(|| ratio.ln());
    (relative_frequency, correlation)
}
