//! Sentence pattern extraction
//!
//! Turns the batch of lines collected for one parse tree into two parallel
//! symbol sequences: a *narrow* pattern that keeps function labels and
//! co-index placeholders, and a *broad* pattern that keeps only the core
//! category and first qualifier and collapses verb forms to a lemma tag.
//!
//! Every line is classified on its own and contributes at most one symbol to
//! each sequence. Lines that cannot be classified (too few tokens, unknown
//! categories, CODE/LATIN/META material) contribute nothing.

use crate::tags::{
    genericize_coindex, is_upper, is_verb_form, lemmatize_verb_form, strip_subtype,
};
use rustc_hash::FxHashSet;

/// Prefix of the first token on a sentence-root line
pub const ROOT_TAG: &str = "IP-MAT";

/// Second tokens on a root line that do not start a sentence-level constituent
pub const NON_CONSTITUENT_MARKERS: &[&str] =
    &["LB", "LATIN", "LS", "META", "REF", "CODE", "QTP", "CONJ"];

/// Single-word categories copied unchanged into both patterns
pub const SINGLE_WORD_TAGS: &[&str] = &["NEG", "RP", "Q", "FP", "ADV", "INTJ", "NUM", "W"];

/// Bare category used for every prepositional phrase
pub const PP_TAG: &str = "PP";

/// What a single tree line adds to the two patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContribution {
    /// No extractable data on this line
    Nothing,
    /// One symbol for each pattern
    Element { narrow: String, broad: String },
}

impl LineContribution {
    fn element(narrow: impl Into<String>, broad: impl Into<String>) -> Self {
        let narrow = narrow.into();
        if narrow.is_empty() {
            return LineContribution::Nothing;
        }
        LineContribution::Element {
            narrow,
            broad: broad.into(),
        }
    }

    /// Narrow symbol with its subtype-stripped broad counterpart
    fn stripped(narrow: String) -> Self {
        let broad = strip_subtype(&narrow);
        Self::element(narrow, broad)
    }
}

/// Narrow and broad symbol sequences for one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternPair {
    pub narrow: Vec<String>,
    pub broad: Vec<String>,
}

impl PatternPair {
    /// Narrow pattern as a space-joined key
    pub fn narrow_key(&self) -> String {
        self.narrow.join(" ")
    }

    /// Broad pattern as a space-joined key
    pub fn broad_key(&self) -> String {
        self.broad.join(" ")
    }

    /// A pattern is worth counting only if it has more than one symbol and
    /// more than one distinct symbol.
    pub fn is_informative(&self) -> bool {
        if self.narrow.len() <= 1 {
            return false;
        }
        let distinct: FxHashSet<&str> = self.narrow.iter().map(String::as_str).collect();
        distinct.len() > 1
    }

    fn push(&mut self, contribution: LineContribution) {
        if let LineContribution::Element { narrow, broad } = contribution {
            self.narrow.push(narrow);
            self.broad.push(broad);
        }
    }
}

/// Extract the narrow and broad patterns from the lines of one tree
///
/// ```
/// use constructicon::pattern::extract_patterns;
///
/// let lines = [
///     "(IP-MAT (ADVP-TMP (ADV Thenne)",
///     "(BED was)",
///     "(NP-SBJ (D the) (N kyng))",
///     "(ADJP (ADVR wonderly) (ADJ wroth))",
/// ];
/// let patterns = extract_patterns(&lines);
/// assert_eq!(patterns.narrow_key(), "ADVP-TMP BED NP-SBJ-D-N ADJP");
/// assert_eq!(patterns.broad_key(), "ADVP-TMP BE NP-SBJ ADJP");
/// ```
pub fn extract_patterns<S: AsRef<str>>(lines: &[S]) -> PatternPair {
    let mut patterns = PatternPair::default();
    for line in lines {
        patterns.push(classify_line(line.as_ref()));
    }
    patterns
}

/// Classify one tree line. The first matching rule wins.
pub fn classify_line(line: &str) -> LineContribution {
    let cleaned = line.replace(['(', ')'], "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return LineContribution::Nothing;
    };

    if head.starts_with(ROOT_TAG) {
        // constituent directly after the root tag, if any
        return match tokens.get(1) {
            Some(&first) if !NON_CONSTITUENT_MARKERS.contains(&first) => {
                LineContribution::stripped(genericize_coindex(first))
            }
            _ => LineContribution::Nothing,
        };
    }

    if head == PP_TAG {
        return LineContribution::element(PP_TAG, PP_TAG);
    }

    if head.starts_with("VP") {
        return match tokens.get(1) {
            Some(&verb) => LineContribution::element(verb, lemmatize_verb_form(verb)),
            None => LineContribution::Nothing,
        };
    }

    if is_verb_form(head) {
        return LineContribution::element(head, lemmatize_verb_form(head));
    }

    if SINGLE_WORD_TAGS.contains(&head) {
        return LineContribution::element(head, head);
    }

    if head.starts_with("IP") {
        return LineContribution::stripped(genericize_coindex(head));
    }

    // CP and RRP keep their co-index in the narrow pattern
    if head.starts_with("CP") || head.starts_with("RRP") {
        return LineContribution::stripped(head.to_string());
    }

    if head.starts_with("ADVP") || head.starts_with("ADJP") {
        return LineContribution::stripped(genericize_coindex(head));
    }

    if head.starts_with("NP") {
        return classify_noun_phrase(&tokens);
    }

    LineContribution::Nothing
}

/// NP lines fold their modifiers into the symbol: `NP-SBJ *exp*` becomes
/// `NP-SBJ-*exp*`, and longer phrases keep only their upper-case tags.
fn classify_noun_phrase(tokens: &[&str]) -> LineContribution {
    let narrow = match tokens.len() {
        0 | 1 => return LineContribution::Nothing,
        2 => tokens
            .iter()
            .map(|t| genericize_coindex(t))
            .collect::<Vec<_>>()
            .join("-"),
        _ => tokens
            .iter()
            .filter(|t| is_upper(t))
            .map(|t| genericize_coindex(t))
            .collect::<Vec<_>>()
            .join("-"),
    };
    LineContribution::stripped(narrow)
}
