//! Settings file holding the persisted category set.
//!
//! Each category is a `[Category_NN]` table with `Name`, `Color`,
//! `PatternsCaseInsensitive` and `PatternsCaseSensitive` keys. Tables with
//! other names are left untouched on save.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::category::{CaseSensitivity, Category, CategoryStore, Classifier};
use crate::color::Rgb;
use crate::error::{FilecatError, Result};

const CONFIG_DIR: &str = "filecat";
const CONFIG_FILE: &str = "categories.toml";

/// Prefix of every category table name.
pub const GROUP_PREFIX: &str = "Category_";

const KEY_NAME: &str = "Name";
const KEY_COLOR: &str = "Color";
const KEY_CASE_INSENSITIVE: &str = "PatternsCaseInsensitive";
const KEY_CASE_SENSITIVE: &str = "PatternsCaseSensitive";

/// Header written by `init`, followed by the builtin categories
const DEFAULT_CONFIG_HEADER: &str = r##"# filecat category definitions
#
# One [Category_NN] table per category, tried in numeric order.
#   Name                     display name
#   Color                    "#rrggbb"
#   PatternsCaseInsensitive  "*.ext" suffixes or full-name globs, any case
#   PatternsCaseSensitive    "*.ext" suffixes or full-name globs, exact case
#
# Suffix matches always win over glob matches. If two categories list the
# same suffix, the later one wins.

"##;

/// Categories read from a settings document, with the problems found on the way.
#[derive(Debug)]
pub struct LoadedCategories {
    pub store: CategoryStore,
    /// Skipped patterns and unreadable colors. None of them abort loading.
    pub problems: Vec<FilecatError>,
    /// No categories were configured and the builtin set was used instead.
    pub bootstrapped: bool,
}

impl LoadedCategories {
    pub fn into_classifier(self) -> Classifier {
        Classifier::new(self.store)
    }
}

/// A parsed settings document.
#[derive(Debug, Clone, Default)]
pub struct Config {
    document: Table,
}

impl Config {
    /// `<config_dir>/filecat/categories.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(FilecatError::ConfigDirNotFound)
    }

    /// Load a settings file. A missing file is an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| FilecatError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let document: Table = toml::from_str(content)?;
        Ok(Self { document })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render()?)?;
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.document)?)
    }

    /// Write the builtin categories to `path` unless it already exists.
    ///
    /// Returns whether a file was written.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        let mut config = Self::default();
        config.write_categories(&CategoryStore::builtin());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{}{}", DEFAULT_CONFIG_HEADER, config.render()?))?;
        Ok(true)
    }

    /// Category table names in load order.
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .document
            .keys()
            .map(String::as_str)
            .filter(|k| k.starts_with(GROUP_PREFIX))
            .collect();
        names.sort_by_key(|name| (group_number(name).unwrap_or(u32::MAX), *name));
        names
    }

    /// Build a store from the category tables.
    ///
    /// Missing names fall back to the table name, missing or unreadable colors
    /// to neutral gray, and invalid patterns are skipped. An empty result is
    /// replaced by the builtin categories.
    pub fn read_categories(&self) -> LoadedCategories {
        let mut store = CategoryStore::new();
        let mut problems = Vec::new();

        for group_name in self.group_names() {
            let Some(group) = self.document.get(group_name).and_then(Value::as_table) else {
                tracing::warn!(group = group_name, "ignoring non-table category entry");
                continue;
            };

            let name = group
                .get(KEY_NAME)
                .and_then(Value::as_str)
                .unwrap_or(group_name);

            let color = match group.get(KEY_COLOR).and_then(Value::as_str) {
                Some(value) => value.parse::<Rgb>().unwrap_or_else(|e| {
                    tracing::warn!(group = group_name, "{}; using {}", e, Rgb::FALLBACK);
                    problems.push(e);
                    Rgb::FALLBACK
                }),
                None => Rgb::FALLBACK,
            };

            let mut category = Category::new(name, color);
            problems.extend(category.add_entries(
                string_list(group.get(KEY_CASE_INSENSITIVE)),
                CaseSensitivity::Insensitive,
            ));
            problems.extend(category.add_entries(
                string_list(group.get(KEY_CASE_SENSITIVE)),
                CaseSensitivity::Sensitive,
            ));

            store.add(category);
        }

        let bootstrapped = store.is_empty();
        if bootstrapped {
            tracing::info!("no categories configured, using builtin defaults");
            store = CategoryStore::builtin();
        }

        LoadedCategories {
            store,
            problems,
            bootstrapped,
        }
    }

    /// Replace all category tables with the contents of `store`, in store order.
    pub fn write_categories(&mut self, store: &CategoryStore) {
        let stale: Vec<String> = self
            .document
            .keys()
            .filter(|k| k.starts_with(GROUP_PREFIX))
            .cloned()
            .collect();
        for key in stale {
            self.document.remove(&key);
        }

        for (i, category) in store.all().enumerate() {
            let mut group = Table::new();
            group.insert(KEY_NAME.to_string(), Value::String(category.name.clone()));
            group.insert(
                KEY_COLOR.to_string(),
                Value::String(category.color.to_string()),
            );
            group.insert(
                KEY_CASE_INSENSITIVE.to_string(),
                pattern_array(category.human_readable_patterns(CaseSensitivity::Insensitive)),
            );
            group.insert(
                KEY_CASE_SENSITIVE.to_string(),
                pattern_array(category.human_readable_patterns(CaseSensitivity::Sensitive)),
            );

            self.document
                .insert(format!("{}{:02}", GROUP_PREFIX, i + 1), Value::Table(group));
        }
    }
}

/// Load the category set from `path`, bootstrapping defaults when empty.
pub fn load_categories(path: &Path) -> Result<LoadedCategories> {
    Ok(Config::load(path)?.read_categories())
}

/// Persist `store` to `path`, keeping unrelated tables already in the file.
pub fn save_categories(path: &Path, store: &CategoryStore) -> Result<()> {
    let mut config = Config::load(path)?;
    config.write_categories(store);
    config.save(path)
}

fn group_number(name: &str) -> Option<u32> {
    name.strip_prefix(GROUP_PREFIX)?.parse().ok()
}

/// A single string is accepted as a one-element list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Empty lists are written as `[""]`.
fn pattern_array(mut patterns: Vec<String>) -> Value {
    if patterns.is_empty() {
        patterns.push(String::new());
    }
    Value::Array(patterns.into_iter().map(Value::String).collect())
}
