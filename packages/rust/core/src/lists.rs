//! Word-list file I/O.
//!
//! List files are plain text, one uppercase word per line. Every write goes
//! through a sibling temporary file that is renamed over the destination, so
//! a destination is either fully rewritten or left as it was.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fivelist_shared::{FivelistError, Result};
use tracing::debug;

/// Read a list as a set of uppercase, trimmed, non-empty entries.
pub fn read_word_set(path: &Path) -> Result<BTreeSet<String>> {
    let content = read_list(path)?;
    // Lone carriage returns also end a line.
    let words: BTreeSet<String> = content
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect();

    debug!(path = %path.display(), words = words.len(), "read word set");
    Ok(words)
}

/// Read the lines that are exactly `len` bytes once the line ending is
/// stripped, in file order. Duplicates are kept.
pub fn read_exact_length_lines(path: &Path, len: usize) -> Result<Vec<String>> {
    let content = read_list(path)?;
    Ok(content
        .split('\n')
        .map(|line| line.trim_end_matches(['\r', '\n']))
        .filter(|line| line.len() == len)
        .map(str::to_string)
        .collect())
}

/// Write `words` one per line, each terminated by `\n`.
pub fn write_word_list<I, S>(path: &Path, words: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    let mut count = 0;
    for word in words {
        content.push_str(word.as_ref());
        content.push('\n');
        count += 1;
    }

    write_atomic(path, &content)?;
    debug!(path = %path.display(), count, "wrote word list");
    Ok(count)
}

/// Replace `path` with `content` via a temporary sibling file.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FivelistError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, content).map_err(|e| FivelistError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        FivelistError::io(path, e)
    })
}

fn read_list(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| FivelistError::io(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("list"));
    name.push(".tmp");
    path.with_file_name(name)
}
