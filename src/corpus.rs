//! Corpus discovery and the single aggregation pass
//!
//! A corpus is a directory of `.psd` files (optionally gzipped). Files are
//! processed one at a time in sorted path order, so which tree becomes the
//! representative of a repeated pattern is the same on every platform.

use crate::aggregate::Aggregator;
use crate::metadata::period_code;
use crate::psd::TreeReader;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File extensions recognized as parsed corpus files
pub const CORPUS_GLOBS: &[&str] = &["*.psd", "*.psd.gz"];

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("invalid corpus file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("no .psd parsed corpus files found in {}", .0.display())]
    NoFiles(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File name without its directory and `.psd` / `.psd.gz` extension
pub fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.strip_suffix(".psd").unwrap_or(name).to_string()
}

/// An ordered set of corpus files
#[derive(Debug, Clone)]
pub struct Corpus {
    files: Vec<PathBuf>,
}

impl Corpus {
    /// Collect every parsed corpus file directly inside `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        let mut files = Vec::new();
        for pattern in CORPUS_GLOBS {
            let pattern = Path::new(&escaped).join(pattern);
            files.extend(glob::glob(&pattern.to_string_lossy())?.filter_map(Result::ok));
        }
        if files.is_empty() {
            return Err(CorpusError::NoFiles(dir.to_path_buf()));
        }
        files.sort();
        Ok(Self { files })
    }

    /// Use explicit file paths, in the order given
    pub fn from_paths(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Read every file and accumulate its trees into a fresh aggregator
    pub fn aggregate(&self) -> Result<Aggregator, CorpusError> {
        let mut aggregate = Aggregator::new();
        for path in &self.files {
            aggregate_file(path, &mut aggregate)?;
        }
        Ok(aggregate)
    }
}

/// Accumulate the trees of one file. An unreadable file fails the whole run.
pub fn aggregate_file(path: &Path, aggregate: &mut Aggregator) -> Result<(), CorpusError> {
    let read_error = |source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = TreeReader::from_file(path).map_err(read_error)?;
    let source = reader.source().to_string();
    aggregate.begin_file(&source);

    let mut trees = 0;
    let mut accepted = 0;
    for record in reader.by_ref() {
        let record = record.map_err(read_error)?;
        trees += 1;
        if aggregate.add_tree(&record) {
            accepted += 1;
        }
    }
    aggregate.record_sentences(&source, reader.sentences());

    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    info!(
        file = %source,
        period = period_code(&name).unwrap_or(""),
        sentences = reader.sentences(),
        trees,
        accepted,
        "processed corpus file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const MALORY: &str = "\
( (IP-MAT (ADVP-TMP (ADV Thenne))
\t(BED was)
\t(NP-SBJ (D the) (N kyng))
\t(ADJP (ADVR wonderly) (ADJ wroth))
\t(ID CMMALORY,2.45))

( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t(ID CMMALORY,2.46))

( (IP-MAT (CODE <P_2>)
\t(NP-SBJ (PRO he))
\t(ID CMMALORY,2.47))
";

    const KENTHO: &str = "\
( (IP-MAT (NP-SBJ (PRO he))
\t(VBD seyde)
\t(ID CMKENTHO,1.1))
";

    fn create_test_files(contents: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (filename, content) in contents {
            fs::write(dir.path().join(filename), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/c/cmmalory.m4.psd")), "cmmalory.m4");
        assert_eq!(file_stem(Path::new("cmorm.po.m1.psd.gz")), "cmorm.po.m1");
        assert_eq!(file_stem(Path::new("notes.txt")), "notes.txt");
    }

    #[test]
    fn test_from_dir_sorted_and_filtered() {
        let dir = create_test_files(&[
            ("cmmalory.m4.psd", MALORY),
            ("cmkentho.m1.psd", KENTHO),
            ("readme.txt", "ignored"),
        ]);
        let corpus = Corpus::from_dir(dir.path()).unwrap();
        let names: Vec<String> = corpus.files().iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, vec!["cmkentho.m1", "cmmalory.m4"]);
    }

    #[test]
    fn test_from_dir_without_psd_files() {
        let dir = create_test_files(&[("readme.txt", "ignored")]);
        assert!(matches!(
            Corpus::from_dir(dir.path()),
            Err(CorpusError::NoFiles(_))
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = create_test_files(&[("cmkentho.m1.psd", KENTHO)]);
        let corpus = Corpus::from_paths(vec![
            dir.path().join("cmkentho.m1.psd"),
            dir.path().join("missing.m1.psd"),
        ]);
        assert!(matches!(
            corpus.aggregate(),
            Err(CorpusError::Read { .. })
        ));
    }

    #[test]
    fn test_aggregate() {
        let dir = create_test_files(&[
            ("cmmalory.m4.psd", MALORY),
            ("cmkentho.m1.psd", KENTHO),
        ]);
        let agg = Corpus::from_dir(dir.path()).unwrap().aggregate().unwrap();

        assert_eq!(agg.file_names(), &["cmkentho.m1", "cmmalory.m4"]);
        assert_eq!(agg.sentence_count("cmmalory.m4"), 3);
        assert_eq!(agg.count("NP-SBJ VBD"), 2);
        assert_eq!(agg.count("ADVP-TMP BED NP-SBJ-D-N ADJP"), 1);
        // the CODE tree has a single symbol and is not counted
        assert_eq!(agg.num_patterns(), 2);
        assert_eq!(agg.element_total(), 8);

        // cmmalory is read after cmkentho, so its tree represents the pattern
        assert_eq!(agg.id_for("NP-SBJ VBD"), Some("CMMALORY,2.46"));
        assert_eq!(agg.file_for("CMKENTHO,1.1"), Some("cmkentho.m1"));
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let dir = create_test_files(&[
            ("cmmalory.m4.psd", MALORY),
            ("cmkentho.m1.psd", KENTHO),
        ]);
        let corpus = Corpus::from_dir(dir.path()).unwrap();
        let first = crate::score::score(&corpus.aggregate().unwrap(), 1);
        let second = crate::score::score(&corpus.aggregate().unwrap(), 1);
        assert_eq!(first, second);
    }
}
