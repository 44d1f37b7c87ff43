//! Classification Index
//!
//! Suffix lookup maps derived from a [`CategoryStore`], rebuilt lazily.
//! Entries point at store positions, so the index is only meaningful for the
//! store revision it was built from.

use std::collections::HashMap;

use super::definition::{CaseSensitivity, Category};
use super::store::CategoryStore;

/// Two categories declaring the same suffix. The later one in store order won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixConflict {
    pub suffix: String,
    pub case_sensitivity: CaseSensitivity,
    pub previous: String,
    pub winner: String,
}

#[derive(Debug, Default)]
pub struct ClassificationIndex {
    case_sensitive: HashMap<String, usize>,
    case_insensitive: HashMap<String, usize>,
    built_for: Option<u64>,
    conflicts: Vec<SuffixConflict>,
}

impl ClassificationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self, store: &CategoryStore) -> bool {
        self.built_for != Some(store.revision())
    }

    /// Force a rebuild on the next `ensure_built`.
    pub fn invalidate(&mut self) {
        self.built_for = None;
    }

    /// Rebuild both maps if the store changed since the last build.
    pub fn ensure_built(&mut self, store: &CategoryStore) {
        if !self.is_dirty(store) {
            return;
        }

        self.case_sensitive.clear();
        self.case_insensitive.clear();
        self.conflicts.clear();

        let categories: Vec<&Category> = store.all().collect();

        for (pos, category) in categories.iter().enumerate() {
            for suffix in category.case_sensitive_suffixes() {
                insert(
                    &mut self.case_sensitive,
                    &mut self.conflicts,
                    &categories,
                    suffix,
                    pos,
                    CaseSensitivity::Sensitive,
                );
            }
            for suffix in category.case_insensitive_suffixes() {
                insert(
                    &mut self.case_insensitive,
                    &mut self.conflicts,
                    &categories,
                    suffix,
                    pos,
                    CaseSensitivity::Insensitive,
                );
            }
        }

        tracing::debug!(
            categories = categories.len(),
            case_sensitive = self.case_sensitive.len(),
            case_insensitive = self.case_insensitive.len(),
            conflicts = self.conflicts.len(),
            "rebuilt suffix index"
        );

        self.built_for = Some(store.revision());
    }

    /// Store position of the owner of `suffix`.
    ///
    /// The case-sensitive map is tried first, then the lower-cased suffix in the
    /// case-insensitive map.
    pub fn lookup(&self, suffix: &str) -> Option<usize> {
        self.case_sensitive
            .get(suffix)
            .or_else(|| self.case_insensitive.get(&suffix.to_lowercase()))
            .copied()
    }

    /// Conflicts found by the most recent rebuild.
    pub fn conflicts(&self) -> &[SuffixConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.case_sensitive.len() + self.case_insensitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn insert(
    map: &mut HashMap<String, usize>,
    conflicts: &mut Vec<SuffixConflict>,
    categories: &[&Category],
    suffix: &str,
    pos: usize,
    case_sensitivity: CaseSensitivity,
) {
    if let Some(previous) = map.insert(suffix.to_string(), pos) {
        if previous == pos {
            return;
        }

        let conflict = SuffixConflict {
            suffix: suffix.to_string(),
            case_sensitivity,
            previous: categories[previous].name.clone(),
            winner: categories[pos].name.clone(),
        };
        tracing::warn!(
            suffix = %conflict.suffix,
            previous = %conflict.previous,
            winner = %conflict.winner,
            "duplicate suffix"
        );
        conflicts.push(conflict);
    }
}
