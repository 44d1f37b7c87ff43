use std::path::PathBuf;
use thiserror::Error;

use crate::category::CategoryId;

#[derive(Debug, Error)]
pub enum FilecatError {
    #[error("Category not found: {id}")]
    CategoryNotFound { id: CategoryId },

    #[error("Category name not found: {name}")]
    CategoryNameNotFound { name: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid color: '{value}' - expected #rrggbb")]
    InvalidColor { value: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FilecatError>;

impl FilecatError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CategoryNotFound { .. } | Self::CategoryNameNotFound { .. } => 2,
            Self::DirectoryNotFound { .. } => 3,
            Self::ConfigParse { .. } | Self::TomlDe(_) => 4,
            Self::InvalidPattern { .. } | Self::InvalidColor { .. } => 5,
            _ => 1,
        }
    }
}
