//! Make sure every solution word is also an accepted guess.

use std::collections::BTreeSet;

use fivelist_shared::{ListPaths, Result};
use tracing::{info, instrument};

use crate::lists;

/// What a reconciliation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every solution word was already present; nothing was written.
    AlreadyComplete {
        solution_count: usize,
        full_count: usize,
    },
    /// Missing words were added and the full list rewritten sorted.
    Added {
        /// The added words, sorted.
        missing: Vec<String>,
        /// Size of the rewritten full list.
        total: usize,
    },
}

/// Solution words absent from the full list, sorted.
pub fn missing_words(solution: &BTreeSet<String>, full: &BTreeSet<String>) -> Vec<String> {
    solution.difference(full).cloned().collect()
}

/// Add any solution words missing from the full list.
///
/// The full list is only touched when something is missing, and is then
/// rewritten as the sorted union of both lists.
#[instrument(skip_all, fields(all = %paths.all.display(), solution = %paths.solution.display()))]
pub fn reconcile_lists(paths: &ListPaths) -> Result<ReconcileOutcome> {
    let solution = lists::read_word_set(&paths.solution)?;
    let mut full = lists::read_word_set(&paths.all)?;

    let missing = missing_words(&solution, &full);
    if missing.is_empty() {
        info!(solution = solution.len(), full = full.len(), "full list already complete");
        return Ok(ReconcileOutcome::AlreadyComplete {
            solution_count: solution.len(),
            full_count: full.len(),
        });
    }

    full.extend(missing.iter().cloned());
    let total = lists::write_word_list(&paths.all, &full)?;
    info!(added = missing.len(), total, "rewrote full list");

    Ok(ReconcileOutcome::Added { missing, total })
}
