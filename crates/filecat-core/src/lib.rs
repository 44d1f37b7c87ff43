pub mod category;
pub mod color;
pub mod config;
pub mod error;
pub mod scan;

pub use category::{
    BuiltinCategory, CaseSensitivity, Category, CategoryId, CategoryPattern, CategoryStore,
    ClassificationIndex, Classifier, SuffixConflict, BUILTIN_CATEGORIES,
};
pub use color::Rgb;
pub use config::{load_categories, save_categories, Config, LoadedCategories};
pub use error::{FilecatError, Result};
pub use scan::{scan, CategoryUsage, UsageSummary};
