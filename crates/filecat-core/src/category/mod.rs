//! # Category Module
//!
//! Filename classification into named, colored categories.
//!
//! ## Lookup order
//!
//! 1. Suffixes after the first dot, longest first (`tar.bz2`, then `bz2`),
//!    case-sensitive map before case-insensitive map.
//! 2. Glob patterns against the whole filename, categories in store order.
//! 3. Otherwise uncategorized.
//!
//! ## Module layout
//!
//! - `definition`: `Category` and its rule lists
//! - `builtin`: default categories
//! - `store`: ordered category collection
//! - `index`: lazily rebuilt suffix maps
//! - `classifier`: public lookup API
//!
//! ## Example
//!
//! ```rust
//! use filecat_core::category::{CaseSensitivity, Category, Classifier};
//! use filecat_core::Rgb;
//!
//! let mut classifier = Classifier::builtin();
//! assert_eq!(classifier.classify("main.cpp").unwrap().name, "C/C++");
//!
//! let mut logs = Category::new("Logs", Rgb::new(0x80, 0x80, 0x80));
//! logs.add_suffixes(["log"], CaseSensitivity::Insensitive);
//! classifier.add(logs);
//! assert_eq!(classifier.classify("SERVER.LOG").unwrap().name, "Logs");
//!
//! assert!(classifier.classify_entry("src", true).is_none());
//! ```

mod builtin;
mod classifier;
mod definition;
mod index;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, BUILTIN_CATEGORIES};
pub use classifier::Classifier;
pub use definition::{CaseSensitivity, Category, CategoryPattern};
pub use index::{ClassificationIndex, SuffixConflict};
pub use store::{CategoryId, CategoryStore};
