//! Core domain types for fivelist word lists.

use std::fmt;
use std::str::FromStr;

use crate::error::{FivelistError, Result};

/// Number of letters in every game word.
pub const WORD_LENGTH: usize = 5;

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// A validated five-letter word, stored uppercase.
///
/// Construction only succeeds for exactly [`WORD_LENGTH`] ASCII letters, so
/// every `Word` can be written to a list file or packed into 25 bits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(String);

impl Word {
    /// Validate and uppercase `raw`. Surrounding whitespace is not trimmed.
    pub fn new(raw: &str) -> Result<Self> {
        if raw.len() != WORD_LENGTH || !raw.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(FivelistError::parse(format!(
                "'{raw}' is not a {WORD_LENGTH}-letter word"
            )));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// The uppercase form, as written to list files.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercase form, as used for filtering and hashing.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// The five letters as bytes (uppercase ASCII).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Word {
    type Err = FivelistError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
