//! Candidate selection: which source entries become game words.

use fivelist_shared::{WORD_LENGTH, Word};
use tracing::debug;

/// Trim surrounding whitespace and lowercase.
pub fn normalize(entry: &str) -> String {
    entry.trim().to_lowercase()
}

/// True if a normalized entry is exactly five letters `a`-`z`.
///
/// Proper nouns, contractions, and numerals fall out of this check on their
/// own; no dictionary lookup is involved.
pub fn is_candidate(normalized: &str) -> bool {
    normalized.chars().count() == WORD_LENGTH
        && normalized.chars().all(|c| c.is_ascii_lowercase())
}

/// Select up to `max_words` candidate words, in source order.
///
/// Scanning stops as soon as `max_words` words are accepted, so later
/// entries are never looked at.
pub fn filter_five_letter_words<I, S>(lines: I, max_words: usize) -> Vec<Word>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words = Vec::new();
    if max_words == 0 {
        return words;
    }

    for line in lines {
        let normalized = normalize(line.as_ref());
        // Word::new applies the same five-letter rule as is_candidate
        let Ok(word) = Word::new(&normalized) else {
            continue;
        };
        words.push(word);
        if words.len() >= max_words {
            debug!(max_words, "reached word limit, stopping scan");
            break;
        }
    }

    words
}
