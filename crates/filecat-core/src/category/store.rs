//! Category Store
//!
//! Ordered, exclusively owned collection of categories.
//! Every mutation bumps `revision`, which is how the index learns it is stale.

use std::fmt;

use crate::error::{FilecatError, Result};

use super::builtin::BUILTIN_CATEGORIES;
use super::definition::Category;

/// Identity of a category inside one store. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: CategoryId,
    category: Category,
}

/// Categories in insertion order.
///
/// Order is significant: it breaks ties between patterns and
/// decides which category wins a duplicated suffix.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    entries: Vec<Entry>,
    next_id: u64,
    revision: u64,
}

impl CategoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the builtin defaults.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for builtin in BUILTIN_CATEGORIES {
            store.add(Category::from(builtin));
        }
        store
    }

    /// Append a category and return its identity.
    pub fn add(&mut self, category: Category) -> CategoryId {
        let id = CategoryId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, category });
        self.touch();
        id
    }

    /// Remove by identity and hand the category back to the caller.
    pub fn remove(&mut self, id: CategoryId) -> Result<Category> {
        let pos = self
            .position(id)
            .ok_or(FilecatError::CategoryNotFound { id })?;
        let entry = self.entries.remove(pos);
        self.touch();
        Ok(entry.category)
    }

    /// Drop every category. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// All categories in store order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Category> + '_ {
        self.entries.iter().map(|e| &e.category)
    }

    /// `(id, category)` pairs in store order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (CategoryId, &Category)> + '_ {
        self.entries.iter().map(|e| (e.id, &e.category))
    }

    /// Category with the given identity, if still present.
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.position(id).map(|pos| &self.entries[pos].category)
    }

    /// Mutable access counts as a mutation: the index is rebuilt before the next lookup.
    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        let pos = self.position(id)?;
        self.touch();
        Some(&mut self.entries[pos].category)
    }

    /// First category with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<CategoryId> {
        self.entries
            .iter()
            .find(|e| e.category.name == name)
            .map(|e| e.id)
    }

    pub(crate) fn at(&self, pos: usize) -> Option<&Category> {
        self.entries.get(pos).map(|e| &e.category)
    }

    pub(crate) fn id_at(&self, pos: usize) -> Option<CategoryId> {
        self.entries.get(pos).map(|e| e.id)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutation counter compared by the index to detect staleness.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: CategoryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
