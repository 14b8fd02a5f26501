//! Run configuration
//!
//! Output fields are separated by a tab or a semicolon only: patterns contain
//! spaces and hyphens, and sentence identifiers contain commas.

use crate::score::DEFAULT_MIN_FREQ;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("output field separator must be a tab or a semicolon, got {0:?}")]
    InvalidSeparator(String),

    #[error("minimum frequency must be a positive integer, got {0:?}")]
    InvalidMinFreq(String),

    #[error("corpus directory {} does not exist", .0.display())]
    MissingCorpusDir(PathBuf),

    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),
}

/// Report field separator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Separator {
    #[default]
    Tab,
    Semicolon,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Tab => "\t",
            Separator::Semicolon => ";",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Separator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\t" | "\\t" | "tab" => Ok(Separator::Tab),
            ";" | "semicolon" => Ok(Separator::Semicolon),
            other => Err(ConfigError::InvalidSeparator(other.to_string())),
        }
    }
}

/// Parse a minimum frequency threshold (a positive integer)
pub fn parse_min_freq(s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidMinFreq(s.to_string())),
    }
}

/// Everything one corpus run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub corpus_dir: PathBuf,
    pub out_dir: PathBuf,
    pub min_freq: usize,
    pub separator: Separator,
}

impl RunConfig {
    pub fn new(corpus_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            out_dir: out_dir.into(),
            min_freq: DEFAULT_MIN_FREQ,
            separator: Separator::default(),
        }
    }

    pub fn with_min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = min_freq;
        self
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Check the configuration before any file is read or written
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_freq == 0 {
            return Err(ConfigError::InvalidMinFreq("0".to_string()));
        }
        if !self.corpus_dir.is_dir() {
            return Err(ConfigError::MissingCorpusDir(self.corpus_dir.clone()));
        }
        if !self.out_dir.is_dir() {
            return Err(ConfigError::MissingOutputDir(self.out_dir.clone()));
        }
        Ok(())
    }
}
