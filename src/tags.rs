//! Tag normalization
//!
//! Pure functions that reduce a raw Penn-Helsinki style tag such as
//! `NP-SBJ-1` or `NEG+BEP` to a coarser category. Tags are hyphen-delimited:
//! the first segment is always the core syntactic category, followed by an
//! optional function label, co-index digit and further subtype qualifiers.

/// Suffix that replaces a trailing single-digit co-index (`NP-SBJ-1` -> `NP-SBJ-n`)
pub const COINDEX_PLACEHOLDER: &str = "n";

/// Lemma assigned to verb-form tags missing from [`VERB_FORMS`]
pub const DEFAULT_VERB_LEMMA: &str = "VB";

/// Inflected verb-form tags and the lemma tag each one collapses to in broad patterns
pub const VERB_FORMS: &[(&str, &str)] = &[
    ("MD", "MD"),
    ("HVD", "HV"),
    ("HVP", "HV"),
    ("DOP", "DO"),
    ("DOD", "DO"),
    ("DO", "DO"),
    ("VAN", "VAN"),
    ("VBP", "VB"),
    ("VBD", "VB"),
    ("VB", "VB"),
    ("NEG+VBP", "VB"),
    ("NEG+VB", "VB"),
    ("NEG+VBD", "VB"),
    ("BEP", "BE"),
    ("BED", "BE"),
    ("BE", "BE"),
    ("NEG+BE", "BE"),
    ("NEG+BEP", "BE"),
    ("NEG+BED", "BE"),
];

/// Keep only the core category and the first qualifier of a tag.
///
/// A tag with fewer than two hyphens is returned unchanged.
///
/// ```
/// use constructicon::tags::strip_subtype;
/// assert_eq!(strip_subtype("NP-SBJ-1-D-N"), "NP-SBJ");
/// assert_eq!(strip_subtype("ADVP-TMP"), "ADVP-TMP");
/// ```
pub fn strip_subtype(tag: &str) -> String {
    match memchr::memchr_iter(b'-', tag.as_bytes()).nth(1) {
        Some(second_hyphen) => tag[..second_hyphen].to_string(),
        None => tag.to_string(),
    }
}

/// Replace a trailing `-<digit>` co-index with [`COINDEX_PLACEHOLDER`].
///
/// Only a single trailing digit counts as a co-index; `NP-SBJ-12` is left alone.
pub fn genericize_coindex(tag: &str) -> String {
    let bytes = tag.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1].is_ascii_digit() && bytes[n - 2] == b'-' {
        format!("{}-{}", &tag[..n - 2], COINDEX_PLACEHOLDER)
    } else {
        tag.to_string()
    }
}

/// Look up the lemma tag for a known inflected verb form
pub fn verb_lemma(tag: &str) -> Option<&'static str> {
    VERB_FORMS
        .iter()
        .find(|(form, _)| *form == tag)
        .map(|(_, lemma)| *lemma)
}

/// Whether `tag` is one of the inflected verb forms in [`VERB_FORMS`]
#[inline]
pub fn is_verb_form(tag: &str) -> bool {
    verb_lemma(tag).is_some()
}

/// Collapse a verb-form tag to its lemma tag, defaulting to `VB`
pub fn lemmatize_verb_form(tag: &str) -> &'static str {
    verb_lemma(tag).unwrap_or(DEFAULT_VERB_LEMMA)
}

/// True if the token has at least one cased character and no lower-case ones.
///
/// Distinguishes tags (`NP-SBJ`, `*T*-1`) from terminal words and empty
/// categories written in lower case (`kyng`, `*exp*`). Tokens without any cased
/// character, such as `0`, are not upper-case.
pub fn is_upper(token: &str) -> bool {
    let mut cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
