//! Parsed-corpus (`.psd`) tree segmentation
//!
//! A `.psd` file holds one bracketed parse tree per sentence. A tree starts on
//! a line containing `(IP-MAT`, continues over lines indented by exactly one
//! tab, and ends on the line carrying its corpus identifier, `(ID CM...)`.
//! [`TreeReader`] walks the file once and yields a [`TreeRecord`] for every
//! closed tree, with its narrow and broad patterns already extracted.

use crate::pattern::{PatternPair, extract_patterns};
use flate2::read::MultiGzDecoder;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static END_OF_TREE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(ID (CM.*?)\)").expect("valid end-of-tree regex"));

/// Does this line open a new sentence tree?
#[inline]
pub fn is_root_line(line: &str) -> bool {
    memchr::memmem::find(line.as_bytes(), b"(IP-MAT").is_some()
}

/// Is this line exactly one indentation level into the tree?
///
/// Lines with no tab or with more than one tab belong to deeper structure and
/// are not collected.
#[inline]
pub fn is_continuation_line(line: &str) -> bool {
    memchr::memchr_iter(b'\t', line.as_bytes()).count() == 1
}

/// Corpus identifier on a tree's closing line, if present
pub fn end_line_id(line: &str) -> Option<&str> {
    END_OF_TREE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One closed sentence tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRecord {
    /// File stem of the source file
    pub source: String,
    /// Corpus sentence identifier, e.g. `CMMALORY,1.3`
    pub id: String,
    pub patterns: PatternPair,
}

#[derive(Debug)]
enum Segment {
    Outside,
    Inside(Vec<String>),
}

/// Reader that segments a `.psd` stream into trees
pub struct TreeReader<R: BufRead> {
    reader: R,
    source: String,
    buf: Vec<u8>,
    line_num: usize,
    sentences: usize,
    state: Segment,
}

impl TreeReader<Box<dyn BufRead>> {
    /// Open a `.psd` file; names ending in `.gz` are decompressed on the fly
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader, crate::corpus::file_stem(path)))
    }
}

impl TreeReader<BufReader<io::Cursor<String>>> {
    /// Create a reader over in-memory text
    pub fn from_string(text: &str, source: &str) -> Self {
        let cursor = io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor), source)
    }
}

impl<R: BufRead> TreeReader<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            buf: Vec::new(),
            line_num: 0,
            sentences: 0,
            state: Segment::Outside,
        }
    }

    /// Number of sentence-root lines seen so far
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_num += 1;
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }

    fn drop_open_tree(&mut self) {
        if let Segment::Inside(lines) = std::mem::replace(&mut self.state, Segment::Outside) {
            warn!(
                source = %self.source,
                lines = lines.len(),
                "input ended inside an unterminated tree; tree dropped"
            );
        }
    }

    fn finish_tree(&mut self, id: &str) -> TreeRecord {
        let lines = match std::mem::replace(&mut self.state, Segment::Outside) {
            Segment::Inside(lines) => lines,
            Segment::Outside => Vec::new(),
        };
        debug!(source = %self.source, id, line = self.line_num, "end of tree");
        TreeRecord {
            source: self.source.clone(),
            id: id.to_string(),
            patterns: extract_patterns(&lines),
        }
    }
}

impl<R: BufRead> Iterator for TreeReader<R> {
    type Item = io::Result<TreeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_line() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.drop_open_tree();
                    return None;
                }
            };

            // A root line always starts a fresh batch, even inside an open tree
            let root = is_root_line(&line);
            if root {
                self.sentences += 1;
                debug!(source = %self.source, line = self.line_num, "begin tree");
                self.state = Segment::Inside(vec![line.trim().to_string()]);
            }

            let Segment::Inside(lines) = &mut self.state else {
                continue;
            };
            if !root && is_continuation_line(&line) {
                lines.push(line.trim().to_string());
            }
            // The closing line ends the tree whether or not it was collected
            if let Some(id) = end_line_id(&line) {
                return Some(Ok(self.finish_tree(id)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TREES: &str = "\
( (IP-MAT (ADVP-TMP (ADV Thenne))
\t(BED was)
\t(NP-SBJ (D the) (N kyng))
\t(ADJP (ADVR wonderly) (ADJ wroth))
\t(. .))
\t(ID CMMALORY,2.45))

( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t\t(CP-QUE (C that)
\t(. .))
\t(ID CMMALORY,2.46))
";

    #[test]
    fn test_boundary_predicates() {
        assert!(is_root_line("( (IP-MAT (NP-SBJ (PRO he))"));
        assert!(is_root_line("( (IP-MAT-SPE (PP (P In)"));
        assert!(!is_root_line("\t(IP-SUB (C that)"));

        assert!(is_continuation_line("\t(BED was)\n"));
        assert!(!is_continuation_line("(BED was)"));
        assert!(!is_continuation_line("\t\t(CP-QUE (C that)"));

        assert_eq!(end_line_id("  (ID CMMALORY,2.45))"), Some("CMMALORY,2.45"));
        assert_eq!(end_line_id("(ID CMKENTHO,135.2))"), Some("CMKENTHO,135.2"));
        assert_eq!(end_line_id("(ID EXAMPLE,1))"), None);
        assert_eq!(end_line_id("(NP-SBJ (PRO he))"), None);
    }

    #[test]
    fn test_reads_trees() {
        let trees: Vec<_> = TreeReader::from_string(TWO_TREES, "cmmalory.m4")
            .map(Result::unwrap)
            .collect();

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].source, "cmmalory.m4");
        assert_eq!(trees[0].id, "CMMALORY,2.45");
        assert_eq!(
            trees[0].patterns.narrow_key(),
            "ADVP-TMP BED NP-SBJ-D-N ADJP"
        );
        assert_eq!(trees[0].patterns.broad_key(), "ADVP-TMP BE NP-SBJ ADJP");

        // the doubly indented CP line is not collected
        assert_eq!(trees[1].id, "CMMALORY,2.46");
        assert_eq!(trees[1].patterns.narrow_key(), "NP-SBJ VBD");
    }

    #[test]
    fn test_sentence_counter() {
        let mut reader = TreeReader::from_string(TWO_TREES, "x");
        assert_eq!(reader.sentences(), 0);
        reader.next();
        assert_eq!(reader.sentences(), 1);
        reader.next();
        assert_eq!(reader.sentences(), 2);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_deeply_indented_terminator_still_closes_tree() {
        let text = "\
( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t\t(ID CMX,1.1))
\t(MD shal)
";
        let trees: Vec<_> = TreeReader::from_string(text, "x")
            .map(Result::unwrap)
            .collect();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].id, "CMX,1.1");
        // the line after the terminator belongs to no tree
        assert_eq!(trees[0].patterns.narrow_key(), "NP-SBJ VBD");
    }

    #[test]
    fn test_lines_outside_trees_are_ignored() {
        let text = "\
\t(NP-SBJ (PRO she))
\t(ID CMX,0.1))
( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t(ID CMX,1.1))
";
        let trees: Vec<_> = TreeReader::from_string(text, "x")
            .map(Result::unwrap)
            .collect();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].id, "CMX,1.1");
    }

    #[test]
    fn test_new_root_restarts_batch() {
        let text = "\
( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
( (IP-MAT (ADVP (ADV tho))
\t(BED was)
\t(ID CMX,1.2))
";
        let trees: Vec<_> = TreeReader::from_string(text, "x")
            .map(Result::unwrap)
            .collect();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].patterns.narrow_key(), "ADVP BED");
    }

    #[test]
    fn test_unterminated_tree_is_dropped() {
        let text = "( (IP-MAT (NP-SBJ (PRO he))\n\t(VBD seyde)\n";
        let mut reader = TreeReader::from_string(text, "x");
        assert!(reader.next().is_none());
        assert_eq!(reader.sentences(), 1);
    }

    #[test]
    fn test_gzipped_file() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmmalory.m4.psd.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(TWO_TREES.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let reader = TreeReader::from_file(&path).unwrap();
        assert_eq!(reader.source(), "cmmalory.m4");
        assert_eq!(reader.count(), 2);
    }
}
