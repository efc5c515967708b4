use std::{collections::BTreeSet, fs, path::Path};

use crate::core::error::ProbeError;

/// Trim (byte order marks included), drop blanks, dedupe and sort by code point.
pub fn clean_wordlist(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|word| word.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn load_wordlist(path: &Path) -> Result<Vec<String>, ProbeError> {
    let data = fs::read_to_string(path)?;
    Ok(clean_wordlist(&data))
}

/// Unreadable input is reported and treated as an empty run.
pub fn load_wordlist_or_empty(path: &Path) -> Vec<String> {
    match load_wordlist(path) {
        Ok(words) => words,
        Err(err) => {
            tracing::error!("Error reading '{}': {}", path.display(), err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_dedupes_and_sorts() {
        let words = clean_wordlist("zeta\n alpha \nbeta\r\nalpha\nzeta\n");
        assert_eq!(words, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn dedupe_is_case_sensitive() {
        let words = clean_wordlist("Bob\nbob\nBob\n");
        assert_eq!(words, vec!["Bob", "bob"]);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let words = clean_wordlist("\u{feff}alice\nbob\n");
        assert_eq!(words, vec!["alice", "bob"]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let words = clean_wordlist("\n   \n\t\nsolo\n\n");
        assert_eq!(words, vec!["solo"]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean_wordlist("c\nb\n b\na\n\nc ");
        let twice = clean_wordlist(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_file_yields_empty() {
        let path = std::env::temp_dir().join("namehawk_missing_words.txt");
        let _ = fs::remove_file(&path);
        assert!(load_wordlist(&path).is_err());
        assert!(load_wordlist_or_empty(&path).is_empty());
    }
}
