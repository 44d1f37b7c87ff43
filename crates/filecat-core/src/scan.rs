//! Disk usage per category.
//!
//! Walks a tree and totals file sizes by the category of each basename.
//! Directories are walked into but never classified.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::category::{CategoryId, Classifier};
use crate::color::Rgb;
use crate::error::{FilecatError, Result};

/// Name of the bucket for files no category claims.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub name: String,
    /// `None` for the uncategorized bucket.
    pub color: Option<Rgb>,
    pub files: u64,
    pub bytes: u64,
}

impl CategoryUsage {
    fn new(name: &str, color: Option<Rgb>) -> Self {
        Self {
            name: name.to_string(),
            color,
            files: 0,
            bytes: 0,
        }
    }

    fn record(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    pub root: PathBuf,
    /// One entry per category, in store order, including empty ones.
    pub categories: Vec<CategoryUsage>,
    pub uncategorized: CategoryUsage,
    /// Entries that could not be read.
    pub skipped: u64,
}

impl UsageSummary {
    pub fn total_files(&self) -> u64 {
        self.buckets().map(|u| u.files).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.buckets().map(|u| u.bytes).sum()
    }

    /// Non-empty buckets, largest first. Ties keep store order.
    pub fn by_size(&self) -> Vec<&CategoryUsage> {
        let mut usage: Vec<&CategoryUsage> = self.buckets().filter(|u| u.files > 0).collect();
        usage.sort_by(|a, b| b.bytes.cmp(&a.bytes));
        usage
    }

    fn buckets(&self) -> impl Iterator<Item = &CategoryUsage> {
        self.categories
            .iter()
            .chain(std::iter::once(&self.uncategorized))
    }
}

/// Walk `root` and total every non-directory entry by category.
///
/// Symlinks are not followed; a link counts with its own size.
pub fn scan(root: &Path, classifier: &Classifier) -> Result<UsageSummary> {
    if !root.is_dir() {
        return Err(FilecatError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let store = classifier.store();
    let mut categories = Vec::with_capacity(store.len());
    let mut slots: HashMap<CategoryId, usize> = HashMap::with_capacity(store.len());
    for (slot, (id, category)) in store.iter().enumerate() {
        categories.push(CategoryUsage::new(&category.name, Some(category.color)));
        slots.insert(id, slot);
    }

    let mut uncategorized = CategoryUsage::new(UNCATEGORIZED, None);
    let mut skipped = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                skipped += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let bytes = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), "skipping: {}", e);
                skipped += 1;
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        match classifier
            .classify_id(&name)
            .and_then(|id| slots.get(&id).copied())
        {
            Some(slot) => categories[slot].record(bytes),
            None => uncategorized.record(bytes),
        }
    }

    tracing::debug!(root = %root.display(), skipped, "scan finished");

    Ok(UsageSummary {
        root: root.to_path_buf(),
        categories,
        uncategorized,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, bytes: usize) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; bytes]).unwrap();
    }

    fn usage<'a>(summary: &'a UsageSummary, name: &str) -> &'a CategoryUsage {
        summary
            .categories
            .iter()
            .find(|u| u.name == name)
            .unwrap()
    }

    #[test]
    fn test_scan_totals_by_category() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/main.cpp", 100);
        write(temp.path(), "src/util.h", 20);
        write(temp.path(), "scripts/build.py", 7);
        write(temp.path(), "Makefile", 3);
        write(temp.path(), "photo.heic", 50);

        let classifier = Classifier::builtin();
        let summary = scan(temp.path(), &classifier).unwrap();

        let cee = usage(&summary, "C/C++");
        assert_eq!((cee.files, cee.bytes), (2, 120));
        assert_eq!(usage(&summary, "Python").bytes, 7);
        assert_eq!(usage(&summary, "Build Files").files, 1);
        assert_eq!(
            (summary.uncategorized.files, summary.uncategorized.bytes),
            (1, 50)
        );
        assert_eq!(summary.total_files(), 5);
        assert_eq!(summary.total_bytes(), 180);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_directories_not_counted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("lib.rs")).unwrap();
        write(temp.path(), "lib.rs/mod.rs", 4);

        let summary = scan(temp.path(), &Classifier::builtin()).unwrap();
        assert_eq!(usage(&summary, "Rust").files, 1);
        assert_eq!(summary.total_files(), 1);
    }

    #[test]
    fn test_by_size_orders_non_empty() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", 1);
        write(temp.path(), "b.rs", 10);
        write(temp.path(), "c.unknown", 5);

        let summary = scan(temp.path(), &Classifier::builtin()).unwrap();
        let names: Vec<_> = summary.by_size().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", UNCATEGORIZED, "Python"]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = scan(&missing, &Classifier::builtin()).unwrap_err();
        assert!(matches!(err, FilecatError::DirectoryNotFound { .. }));
    }
}
