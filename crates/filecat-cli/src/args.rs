use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "filecat")]
#[command(about = "Classify files by type and summarize disk usage per category")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Category settings file (default: <config dir>/filecat/categories.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the category of each file name or path
    Classify {
        /// File names or paths (existing directories are reported as such)
        #[arg(required = true)]
        names: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize disk usage per category under a directory
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Show only the N largest categories
        #[arg(short, long)]
        top: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories in lookup order
    List,

    /// Show the rules of one category
    Show {
        /// Category name
        name: String,
    },

    /// Add a category (appended, so it wins duplicated suffixes)
    Add {
        /// Category name
        name: String,

        /// Display color (#rrggbb)
        #[arg(short, long, default_value = "#b0b0b0")]
        color: String,

        /// Case-sensitive suffix, without the dot (repeatable)
        #[arg(short = 's', long = "suffix")]
        suffixes: Vec<String>,

        /// Case-insensitive suffix, without the dot (repeatable)
        #[arg(short = 'i', long = "isuffix")]
        isuffixes: Vec<String>,

        /// Case-sensitive full-name glob (repeatable)
        #[arg(short = 'p', long = "pattern")]
        patterns: Vec<String>,

        /// Case-insensitive full-name glob (repeatable)
        #[arg(short = 'P', long = "ipattern")]
        ipatterns: Vec<String>,
    },

    /// Remove a category by name
    Remove {
        /// Category name
        name: String,
    },

    /// Replace all categories with the builtin defaults
    Reset,

    /// Show suffixes claimed by more than one category
    Conflicts,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show settings file path
    Path,

    /// Write the builtin categories to a new settings file
    Init,
}
