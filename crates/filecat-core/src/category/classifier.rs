//! Category Classifier
//!
//! Maps filenames to categories: suffix lookup through the index first,
//! then glob patterns in store order.

use std::cell::{Ref, RefCell};
use std::path::Path;

use crate::error::Result;

use super::definition::Category;
use super::index::{ClassificationIndex, SuffixConflict};
use super::store::{CategoryId, CategoryStore};

/// Filename classifier over an owned [`CategoryStore`].
///
/// The suffix index is rebuilt on the first query after any store mutation.
/// Not `Sync`: callers sharing one across threads need their own lock.
#[derive(Debug, Default)]
pub struct Classifier {
    store: CategoryStore,
    index: RefCell<ClassificationIndex>,
}

impl Classifier {
    /// Classifier over `store`. The index is built on the first query.
    pub fn new(store: CategoryStore) -> Self {
        Self {
            store,
            index: RefCell::new(ClassificationIndex::new()),
        }
    }

    /// Classifier over the builtin defaults.
    pub fn builtin() -> Self {
        Self::new(CategoryStore::builtin())
    }

    /// Categories in lookup order.
    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// The index is invalidated up front, so even replacing the whole store is safe.
    pub fn store_mut(&mut self) -> &mut CategoryStore {
        self.index.get_mut().invalidate();
        &mut self.store
    }

    /// Give the store back, dropping the index.
    pub fn into_store(self) -> CategoryStore {
        self.store
    }

    /// Append a category; it wins suffixes it shares with earlier ones.
    pub fn add(&mut self, category: Category) -> CategoryId {
        self.store.add(category)
    }

    /// Remove a category by identity.
    pub fn remove(&mut self, id: CategoryId) -> Result<Category> {
        self.store.remove(id)
    }

    /// Remove every category.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Suffix conflicts of the current store, rebuilding the index if needed.
    pub fn conflicts(&self) -> Ref<'_, [SuffixConflict]> {
        self.ensure_index();
        Ref::map(self.index.borrow(), |index| index.conflicts())
    }

    /// Category of a filename, or `None` if uncategorized.
    ///
    /// Suffix candidates start after the first dot and lose one leading
    /// segment per step (`tar.bz2`, then `bz2`). The first candidate found in
    /// either suffix map wins. Without a suffix hit, the first pattern matching
    /// the whole name decides, in store order.
    pub fn classify(&self, filename: &str) -> Option<&Category> {
        self.find(filename).and_then(|pos| self.store.at(pos))
    }

    /// Identity of the matching category, for callers that aggregate per category.
    pub fn classify_id(&self, filename: &str) -> Option<CategoryId> {
        self.find(filename).and_then(|pos| self.store.id_at(pos))
    }

    /// Like [`classify`](Self::classify), but directories are never categorized.
    pub fn classify_entry(&self, name: &str, is_dir: bool) -> Option<&Category> {
        if is_dir {
            return None;
        }
        self.classify(name)
    }

    /// Classify a path by its final component.
    ///
    /// Non-UTF-8 bytes in the name are replaced with U+FFFD first, so a
    /// case-sensitive pattern spelling those bytes out will not match.
    pub fn classify_path(&self, path: &Path, is_dir: bool) -> Option<&Category> {
        let name = path.file_name()?.to_string_lossy();
        self.classify_entry(&name, is_dir)
    }

    fn ensure_index(&self) {
        let stale = self.index.borrow().is_dirty(&self.store);
        if stale {
            self.index.borrow_mut().ensure_built(&self.store);
        }
    }

    fn find(&self, filename: &str) -> Option<usize> {
        if filename.is_empty() {
            return None;
        }

        self.ensure_index();

        self.match_suffix(filename)
            .or_else(|| self.match_patterns(filename))
    }

    fn match_suffix(&self, filename: &str) -> Option<usize> {
        let index = self.index.borrow();
        let mut candidate = next_suffix(filename);

        while let Some(suffix) = candidate {
            if let Some(pos) = index.lookup(suffix) {
                return Some(pos);
            }
            candidate = next_suffix(suffix);
        }

        None
    }

    fn match_patterns(&self, filename: &str) -> Option<usize> {
        self.store
            .all()
            .position(|category| category.patterns().iter().any(|p| p.matches(filename)))
    }
}

/// Everything after the first dot, or `None` when that is empty.
fn next_suffix(name: &str) -> Option<&str> {
    name.split_once('.')
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CaseSensitivity;
    use crate::color::Rgb;

    fn category(name: &str) -> Category {
        Category::new(name, Rgb::FALLBACK)
    }

    fn name_of<'a>(classifier: &'a Classifier, filename: &str) -> Option<&'a str> {
        classifier.classify(filename).map(|c| c.name.as_str())
    }

    #[test]
    fn test_next_suffix() {
        assert_eq!(next_suffix("archive.tar.bz2"), Some("tar.bz2"));
        assert_eq!(next_suffix("tar.bz2"), Some("bz2"));
        assert_eq!(next_suffix("bz2"), None);
        assert_eq!(next_suffix("."), None);
        assert_eq!(next_suffix("trailing."), None);
        assert_eq!(next_suffix(".bashrc"), Some("bashrc"));
    }

    #[test]
    fn test_case_sensitive_suffix() {
        let mut cee = category("C");
        cee.add_suffixes(["c", "h"], CaseSensitivity::Sensitive);
        let classifier = Classifier::new({
            let mut store = CategoryStore::new();
            store.add(cee);
            store
        });

        assert_eq!(name_of(&classifier, "main.c"), Some("C"));
        assert_eq!(name_of(&classifier, "x.h"), Some("C"));
        assert_eq!(name_of(&classifier, "main.C"), None);
    }

    #[test]
    fn test_case_insensitive_suffix_matches_upper() {
        let mut classifier = Classifier::default();
        let mut images = category("Images");
        images.add_suffixes(["jpg", "png"], CaseSensitivity::Insensitive);
        classifier.add(images);

        assert_eq!(name_of(&classifier, "x.JPG"), Some("Images"));
        assert_eq!(name_of(&classifier, "x.Png"), Some("Images"));
        assert_eq!(name_of(&classifier, "x.png"), Some("Images"));
    }

    #[test]
    fn test_compound_suffix_falls_back_to_last_component() {
        let mut classifier = Classifier::default();
        let mut archives = category("Archives");
        archives.add_suffixes(["bz2"], CaseSensitivity::Insensitive);
        classifier.add(archives);

        assert_eq!(name_of(&classifier, "archive.tar.bz2"), Some("Archives"));
    }

    #[test]
    fn test_compound_suffix_preferred_when_declared() {
        let mut classifier = Classifier::default();
        let mut compressed = category("Compressed");
        compressed.add_suffixes(["gz"], CaseSensitivity::Insensitive);
        let mut tarballs = category("Tarballs");
        tarballs.add_suffixes(["tar.gz"], CaseSensitivity::Insensitive);
        classifier.add(compressed);
        classifier.add(tarballs);

        assert_eq!(name_of(&classifier, "src.tar.gz"), Some("Tarballs"));
        assert_eq!(name_of(&classifier, "log.gz"), Some("Compressed"));
    }

    #[test]
    fn test_suffix_precedes_pattern() {
        let mut classifier = Classifier::default();
        let mut patterned = category("B");
        patterned.add_patterns(["notes.*"], CaseSensitivity::Sensitive);
        let mut suffixed = category("A");
        suffixed.add_suffixes(["txt"], CaseSensitivity::Sensitive);
        classifier.add(patterned);
        classifier.add(suffixed);

        assert_eq!(name_of(&classifier, "notes.txt"), Some("A"));
    }

    #[test]
    fn test_plain_suffix_pattern_acts_as_suffix() {
        let mut classifier = Classifier::default();
        let mut notes = category("Notes");
        notes.add_patterns(["notes.*"], CaseSensitivity::Sensitive);
        let mut text = category("Text");
        text.add_patterns(["*.txt"], CaseSensitivity::Sensitive);
        classifier.add(notes);
        classifier.add(text);

        assert_eq!(name_of(&classifier, "notes.txt"), Some("Text"));
        assert_eq!(name_of(&classifier, "notes.md"), Some("Notes"));
    }

    #[test]
    fn test_pattern_fallback_in_store_order() {
        let mut classifier = Classifier::default();
        let mut first = category("first");
        first.add_patterns(["core", "Make*"], CaseSensitivity::Sensitive);
        let mut second = category("second");
        second.add_patterns(["Makefile"], CaseSensitivity::Sensitive);
        classifier.add(first);
        classifier.add(second);

        assert_eq!(name_of(&classifier, "Makefile"), Some("first"));
        assert_eq!(name_of(&classifier, "core"), Some("first"));
        assert_eq!(name_of(&classifier, "makefile"), None);
    }

    #[test]
    fn test_pattern_respects_case_flag() {
        let mut classifier = Classifier::default();
        let mut docs = category("Docs");
        docs.add_patterns(["readme"], CaseSensitivity::Insensitive);
        classifier.add(docs);

        assert_eq!(name_of(&classifier, "README"), Some("Docs"));
    }

    #[test]
    fn test_directories_never_classified() {
        let classifier = Classifier::builtin();
        assert!(classifier.classify_entry("src.cpp", true).is_none());
        assert!(classifier
            .classify_path(Path::new("/tmp/project/Makefile"), true)
            .is_none());
        assert_eq!(
            classifier
                .classify_entry("src.cpp", false)
                .map(|c| c.name.as_str()),
            Some("C/C++")
        );
    }

    #[test]
    fn test_classify_path_uses_basename() {
        let classifier = Classifier::builtin();
        let category = classifier.classify_path(Path::new("/home/user.name/lib.rs"), false);
        assert_eq!(category.map(|c| c.name.as_str()), Some("Rust"));
        assert!(classifier.classify_path(Path::new("/"), false).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_path_non_utf8_name_keeps_suffix() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let classifier = Classifier::builtin();
        let path = Path::new(OsStr::from_bytes(b"caf\xe9.rs"));
        let category = classifier.classify_path(path, false);
        assert_eq!(category.map(|c| c.name.as_str()), Some("Rust"));
    }

    #[test]
    fn test_empty_and_dot_names() {
        let classifier = Classifier::builtin();
        assert!(classifier.classify("").is_none());
        assert!(classifier.classify(".").is_none());
    }

    #[test]
    fn test_dot_name_falls_through_to_patterns() {
        let mut classifier = Classifier::default();
        let mut dots = category("Dots");
        dots.add_patterns(["."], CaseSensitivity::Sensitive);
        classifier.add(dots);

        assert_eq!(name_of(&classifier, "."), Some("Dots"));
    }

    #[test]
    fn test_builtin_main_cpp() {
        let classifier = Classifier::builtin();
        assert_eq!(name_of(&classifier, "main.cpp"), Some("C/C++"));
        assert_eq!(name_of(&classifier, "Main.java"), Some("Java"));
        assert_eq!(name_of(&classifier, "backup.tar.bz2"), Some("Archives"));
        assert_eq!(name_of(&classifier, "Makefile"), Some("Build Files"));
        assert_eq!(name_of(&classifier, "README"), Some("Documents"));
        assert_eq!(name_of(&classifier, "photo.heic"), None);
    }

    #[test]
    fn test_every_builtin_suffix_round_trips() {
        let classifier = Classifier::builtin();
        for category in classifier.store().all() {
            for suffix in category.case_sensitive_suffixes() {
                let found = classifier.classify(&format!("x.{}", suffix));
                assert_eq!(found.map(|c| &c.name), Some(&category.name), "{}", suffix);
            }
            for suffix in category.case_insensitive_suffixes() {
                let found = classifier.classify(&format!("x.{}", suffix.to_uppercase()));
                assert_eq!(found.map(|c| &c.name), Some(&category.name), "{}", suffix);
            }
        }
    }

    #[test]
    fn test_duplicate_suffix_second_added_wins() {
        let mut classifier = Classifier::default();
        let mut first = category("first");
        first.add_suffixes(["x"], CaseSensitivity::Sensitive);
        let mut second = category("second");
        second.add_suffixes(["x"], CaseSensitivity::Sensitive);
        classifier.add(first);
        classifier.add(second);

        assert_eq!(name_of(&classifier, "f.x"), Some("second"));
        let conflicts = classifier.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].previous, "first");
        assert_eq!(conflicts[0].winner, "second");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = Classifier::builtin();
        let a = classifier.classify("lib.py").map(|c| c.name.clone());
        let b = classifier.classify("lib.py").map(|c| c.name.clone());
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("Python"));
    }

    #[test]
    fn test_mutation_is_observed() {
        let mut classifier = Classifier::default();
        assert!(classifier.classify("f.zz").is_none());

        let mut zz = category("ZZ");
        zz.add_suffixes(["zz"], CaseSensitivity::Sensitive);
        let id = classifier.add(zz);
        assert_eq!(name_of(&classifier, "f.zz"), Some("ZZ"));

        classifier.remove(id).unwrap();
        assert!(classifier.classify("f.zz").is_none());
    }

    #[test]
    fn test_get_mut_is_observed() {
        let mut classifier = Classifier::default();
        let id = classifier.add(category("Late"));
        assert!(classifier.classify("f.late").is_none());

        classifier
            .store_mut()
            .get_mut(id)
            .unwrap()
            .add_suffixes(["late"], CaseSensitivity::Sensitive);
        assert_eq!(name_of(&classifier, "f.late"), Some("Late"));
    }

    #[test]
    fn test_classify_id_matches_store() {
        let mut classifier = Classifier::default();
        let mut docs = category("Docs");
        docs.add_suffixes(["md"], CaseSensitivity::Insensitive);
        let mut build = category("Build");
        build.add_patterns(["Makefile"], CaseSensitivity::Sensitive);
        let docs_id = classifier.add(docs);
        let build_id = classifier.add(build);

        assert_eq!(classifier.classify_id("README.MD"), Some(docs_id));
        assert_eq!(classifier.classify_id("Makefile"), Some(build_id));
        assert_eq!(classifier.classify_id("main.rs"), None);
    }

    #[test]
    fn test_replaced_store_is_observed() {
        let mut classifier = Classifier::default();
        assert!(classifier.classify("main.cpp").is_none());

        *classifier.store_mut() = CategoryStore::builtin();
        assert_eq!(name_of(&classifier, "main.cpp"), Some("C/C++"));
    }

    #[test]
    fn test_clear_empties_index() {
        let mut classifier = Classifier::builtin();
        assert!(classifier.classify("main.cpp").is_some());
        classifier.clear();
        assert!(classifier.classify("main.cpp").is_none());
    }
}
