//! Quotes file loaded once at startup, served at random.

use rand::seq::SliceRandom;
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading or serving quotes.
#[derive(Debug)]
pub enum QuoteError {
    /// Failed to read the quotes file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// The corpus contains no quotes.
    Empty,
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read quotes file '{}': {}", path.display(), source)
            }
            Self::Empty => write!(f, "quotes corpus is empty"),
        }
    }
}

impl std::error::Error for QuoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::Empty => None,
        }
    }
}

/// In-memory quotes corpus. Immutable after construction, shared read-only
/// across concurrent handlers.
#[derive(Debug)]
pub struct QuoteStore {
    lines: Vec<String>,
}

impl QuoteStore {
    /// Load the corpus from a UTF-8 text file, one quote per line.
    /// Blank lines are skipped. An unreadable or empty file is a startup
    /// error; the bot cannot serve `/irc_quote` without a corpus.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| QuoteError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let lines: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        if lines.is_empty() {
            return Err(QuoteError::Empty);
        }

        Ok(Self { lines })
    }

    /// Pick one quote uniformly at random.
    pub fn random_quote(&self) -> Result<&str, QuoteError> {
        self.lines
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .ok_or(QuoteError::Empty)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub(crate) fn load_for_test(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_corpus(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let file = write_corpus("first\n\n  second  \n\n\nthird\n");
        let store = QuoteStore::load(file.path()).expect("should load corpus");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = QuoteStore::load("/nonexistent/quotes.txt").unwrap_err();
        assert!(matches!(err, QuoteError::ReadFile { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_corpus("");
        let err = QuoteStore::load(file.path()).unwrap_err();
        assert!(matches!(err, QuoteError::Empty));
    }

    #[test]
    fn test_load_whitespace_only_file() {
        let file = write_corpus("\n   \n\t\n");
        let err = QuoteStore::load(file.path()).unwrap_err();
        assert!(matches!(err, QuoteError::Empty));
    }

    #[test]
    fn test_random_quote_only_returns_corpus_lines() {
        let file = write_corpus("a\nb\nc\n");
        let store = QuoteStore::load(file.path()).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let quote = store.random_quote().expect("non-empty corpus");
            assert!(matches!(quote, "a" | "b" | "c"), "unexpected quote: {quote}");
            seen.insert(quote.to_string());
        }

        // Every line is reachable over many trials.
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_quote_single_line() {
        let file = write_corpus("only\n");
        let store = QuoteStore::load(file.path()).unwrap();
        assert_eq!(store.random_quote().unwrap(), "only");
    }

    #[test]
    fn test_random_quote_empty_corpus_errors() {
        let store = QuoteStore { lines: Vec::new() };
        let err = store.random_quote().unwrap_err();
        assert!(matches!(err, QuoteError::Empty));
    }
}
