//! Stopword lists

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Words ignored when building the word frequency model
pub type Stopwords = HashSet<String>;

/// Split a stopword list on any whitespace
pub fn parse_stopwords(content: &str) -> Stopwords {
    content.split_whitespace().map(str::to_string).collect()
}

/// Read a whitespace or newline delimited stopword file
pub fn load_stopwords(path: &Path) -> Result<Stopwords> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::with_source(format!("Failed to read stopwords: {}", path.display()), e)
    })?;
    let stopwords = parse_stopwords(&content);
    tracing::info!(path = %path.display(), count = stopwords.len(), "Loaded stopwords");
    Ok(stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_stopwords() {
        let words = parse_stopwords("the a\nan\n\n  of\tto\n");
        assert_eq!(words.len(), 5);
        assert!(words.contains("of"));
        assert!(words.contains("to"));
    }

    #[test]
    fn test_load_stopwords_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the\nand").unwrap();

        let words = load_stopwords(file.path()).unwrap();
        assert!(words.contains("the"));
        assert!(words.contains("and"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_stopwords(Path::new("/nonexistent/stopwords.txt")).is_err());
    }
}
