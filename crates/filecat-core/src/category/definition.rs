//! Category Definition
//!
//! A named, colored rule set. Categories only store and normalize their rules;
//! lookup belongs to the index and the classifier.

use glob::{MatchOptions, Pattern};

use crate::color::Rgb;
use crate::error::FilecatError;

/// How a suffix or pattern is compared against a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// `true` for exact comparison.
    pub fn is_sensitive(self) -> bool {
        matches!(self, Self::Sensitive)
    }
}

/// A compiled full-filename glob with its case flag.
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    source: String,
    case_sensitivity: CaseSensitivity,
    compiled: Pattern,
}

impl CategoryPattern {
    /// Compile `source` as a glob.
    pub fn new(source: &str, case_sensitivity: CaseSensitivity) -> Result<Self, FilecatError> {
        let compiled = Pattern::new(source).map_err(|e| FilecatError::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            case_sensitivity,
            compiled,
        })
    }

    /// The glob as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// Whether the glob matches the whole filename.
    pub fn matches(&self, filename: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: self.case_sensitivity.is_sensitive(),
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.compiled.matches_with(filename, options)
    }
}

/// A classification bucket: display name, display color and matching rules.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub color: Rgb,
    case_sensitive_suffixes: Vec<String>,
    case_insensitive_suffixes: Vec<String>,
    patterns: Vec<CategoryPattern>,
}

impl Category {
    /// Category with no rules yet.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            case_sensitive_suffixes: Vec::new(),
            case_insensitive_suffixes: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Suffixes compared exactly, in declaration order.
    pub fn case_sensitive_suffixes(&self) -> &[String] {
        &self.case_sensitive_suffixes
    }

    /// Always lower case.
    pub fn case_insensitive_suffixes(&self) -> &[String] {
        &self.case_insensitive_suffixes
    }

    pub fn suffixes(&self, case_sensitivity: CaseSensitivity) -> &[String] {
        match case_sensitivity {
            CaseSensitivity::Sensitive => &self.case_sensitive_suffixes,
            CaseSensitivity::Insensitive => &self.case_insensitive_suffixes,
        }
    }

    /// Compiled patterns of both case flags, in declaration order.
    pub fn patterns(&self) -> &[CategoryPattern] {
        &self.patterns
    }

    /// Append suffixes without their leading dot.
    ///
    /// Case-insensitive suffixes are stored lower-cased. Empty suffixes are dropped.
    pub fn add_suffixes<I, S>(&mut self, suffixes: I, case_sensitivity: CaseSensitivity)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for suffix in suffixes {
            let suffix = suffix.as_ref().trim_start_matches('.');
            if suffix.is_empty() {
                continue;
            }

            match case_sensitivity {
                CaseSensitivity::Sensitive => self.case_sensitive_suffixes.push(suffix.to_string()),
                CaseSensitivity::Insensitive => {
                    self.case_insensitive_suffixes.push(suffix.to_lowercase())
                }
            }
        }
    }

    /// Compile and append glob patterns.
    ///
    /// A plain `*.ext` is stored as a suffix instead, which is how it is read
    /// back from settings. Patterns that fail to compile are skipped and
    /// returned; the rest are kept.
    pub fn add_patterns<I, S>(
        &mut self,
        patterns: I,
        case_sensitivity: CaseSensitivity,
    ) -> Vec<FilecatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rejected = Vec::new();

        for source in patterns {
            let source = source.as_ref();
            if let Some(suffix) = plain_suffix(source) {
                self.add_suffixes([suffix], case_sensitivity);
                continue;
            }

            match CategoryPattern::new(source, case_sensitivity) {
                Ok(pattern) => self.patterns.push(pattern),
                Err(e) => {
                    tracing::warn!(category = %self.name, "skipping pattern: {}", e);
                    rejected.push(e);
                }
            }
        }

        rejected
    }

    /// Add persisted entries, sorting them into suffixes and patterns.
    ///
    /// `*.ext` with a plain `ext` becomes a suffix, anything else a pattern.
    pub fn add_entries<I, S>(
        &mut self,
        entries: I,
        case_sensitivity: CaseSensitivity,
    ) -> Vec<FilecatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self.add_patterns(entries, case_sensitivity)
    }

    /// Suffixes as `*.ext`, the form shown to users and written to settings.
    pub fn human_readable_suffixes(&self, case_sensitivity: CaseSensitivity) -> Vec<String> {
        self.suffixes(case_sensitivity)
            .iter()
            .map(|s| format!("*.{}", s))
            .collect()
    }

    /// Human-readable suffixes followed by the pattern sources of the same case flag.
    pub fn human_readable_patterns(&self, case_sensitivity: CaseSensitivity) -> Vec<String> {
        let mut list = self.human_readable_suffixes(case_sensitivity);
        list.extend(
            self.patterns
                .iter()
                .filter(|p| p.case_sensitivity == case_sensitivity)
                .map(|p| p.source.clone()),
        );
        list
    }
}

/// `*.tar.gz` -> `tar.gz`; `*.c*` or `Makefile` -> None.
fn plain_suffix(entry: &str) -> Option<&str> {
    let suffix = entry.strip_prefix("*.")?;
    let is_plain = !suffix.is_empty()
        && !suffix
            .chars()
            .any(|c| matches!(c, '*' | '?' | '[' | ']' | '/' | '\\'));
    is_plain.then_some(suffix)
}
