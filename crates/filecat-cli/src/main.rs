use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use filecat_core::config::{load_categories, save_categories, Config};
use filecat_core::scan::{scan, CategoryUsage};
use filecat_core::{CaseSensitivity, Category, CategoryStore, Classifier, FilecatError, Result, Rgb};

mod args;
use args::{CategoriesAction, Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let result = resolve_config_path(cli.config).and_then(|config_path| match cli.command {
        Commands::Classify { names, json } => handle_classify(&config_path, &names, json),
        Commands::Scan { dir, top, json } => handle_scan(&config_path, &dir, top, json),
        Commands::Categories { action } => handle_categories(action, &config_path),
        Commands::Config { action } => handle_config(action, &config_path),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn resolve_config_path(cli_config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_config {
        return Ok(path);
    }

    if let Ok(path) = std::env::var("FILECAT_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    Config::default_path()
}

fn load_classifier(config_path: &Path) -> Result<Classifier> {
    let loaded = load_categories(config_path)?;
    tracing::debug!(
        config = %config_path.display(),
        categories = loaded.store.len(),
        problems = loaded.problems.len(),
        bootstrapped = loaded.bootstrapped,
        "loaded categories"
    );
    Ok(loaded.into_classifier())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "filecat", &mut io::stdout());
}

#[derive(Serialize)]
struct ClassifyRow<'a> {
    name: &'a str,
    directory: bool,
    category: Option<&'a str>,
    color: Option<Rgb>,
}

fn handle_classify(config_path: &Path, names: &[String], json: bool) -> Result<()> {
    let classifier = load_classifier(config_path)?;

    let rows: Vec<ClassifyRow> = names
        .iter()
        .map(|name| {
            let path = Path::new(name);
            let directory = path.is_dir();
            let category = classifier.classify_path(path, directory);
            ClassifyRow {
                name,
                directory,
                category: category.map(|c| c.name.as_str()),
                color: category.map(|c| c.color),
            }
        })
        .collect();

    if json {
        print_json(&rows);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in &rows {
        let label = match (row.directory, row.category, row.color) {
            (true, _, _) => "directory".dimmed().to_string(),
            (false, Some(name), Some(color)) => format!("{} {}", swatch(color), name),
            _ => "uncategorized".dimmed().to_string(),
        };
        println!("{:<width$}  {}", row.name, label, width = width);
    }

    Ok(())
}

fn handle_scan(config_path: &Path, dir: &Path, top: Option<usize>, json: bool) -> Result<()> {
    let classifier = load_classifier(config_path)?;
    let summary = scan(dir, &classifier)?;

    if json {
        print_json(&summary);
        return Ok(());
    }

    let total = summary.total_bytes();
    let mut rows = summary.by_size();
    if let Some(top) = top {
        rows.truncate(top);
    }

    println!();
    println!(
        "{} {}",
        "Usage by category:".bold(),
        summary.root.display().to_string().cyan()
    );
    println!();

    let width = rows.iter().map(|u| u.name.len()).max().unwrap_or(0);
    for usage in rows {
        print_usage_row(usage, total, width);
    }

    println!();
    println!(
        "  {} files, {}",
        summary.total_files(),
        format_bytes(total).bold()
    );
    if summary.skipped > 0 {
        println!(
            "  {} {} entries could not be read",
            "Warning:".yellow(),
            summary.skipped
        );
    }
    println!();

    Ok(())
}

fn print_usage_row(usage: &CategoryUsage, total: u64, width: usize) {
    let share = if total == 0 {
        0.0
    } else {
        usage.bytes as f64 * 100.0 / total as f64
    };
    let marker = match usage.color {
        Some(color) => swatch(color),
        None => " ".to_string(),
    };
    println!(
        "  {} {:<width$}  {:>10}  {:>5.1}%  {:>7} files",
        marker,
        usage.name,
        format_bytes(usage.bytes),
        share,
        usage.files,
        width = width
    );
}

fn handle_categories(action: CategoriesAction, config_path: &Path) -> Result<()> {
    match action {
        CategoriesAction::List => {
            let loaded = load_categories(config_path)?;
            if loaded.bootstrapped {
                println!(
                    "{}",
                    "No categories configured, showing builtin defaults.".dimmed()
                );
            }

            println!();
            for (i, category) in loaded.store.all().enumerate() {
                println!(
                    "  {:>2}. {} {}",
                    i + 1,
                    swatch(category.color),
                    category.name.cyan().bold()
                );
                println!("      {}", rule_summary(category));
            }
            println!();
        }
        CategoriesAction::Show { name } => {
            let loaded = load_categories(config_path)?;
            let id = loaded
                .store
                .find_by_name(&name)
                .ok_or(FilecatError::CategoryNameNotFound { name })?;
            let category = loaded
                .store
                .get(id)
                .ok_or(FilecatError::CategoryNotFound { id })?;
            print_category(category);
        }
        CategoriesAction::Add {
            name,
            color,
            suffixes,
            isuffixes,
            patterns,
            ipatterns,
        } => {
            let mut store = load_categories(config_path)?.store;

            let mut category = Category::new(name, color.parse::<Rgb>()?);
            category.add_suffixes(&suffixes, CaseSensitivity::Sensitive);
            category.add_suffixes(&isuffixes, CaseSensitivity::Insensitive);
            let mut rejected = category.add_patterns(&patterns, CaseSensitivity::Sensitive);
            rejected.extend(category.add_patterns(&ipatterns, CaseSensitivity::Insensitive));
            if let Some(e) = rejected.into_iter().next() {
                return Err(e);
            }

            let name = category.name.clone();
            store.add(category);
            save_categories(config_path, &store)?;
            println!("{} {}", "Added:".green(), name);

            let classifier = Classifier::new(store);
            for conflict in classifier.conflicts().iter() {
                println!(
                    "  {} *.{} now belongs to {} (was {})",
                    "Note:".yellow(),
                    conflict.suffix,
                    conflict.winner,
                    conflict.previous
                );
            }
        }
        CategoriesAction::Remove { name } => {
            let mut store = load_categories(config_path)?.store;
            let id = store
                .find_by_name(&name)
                .ok_or(FilecatError::CategoryNameNotFound { name })?;
            let removed = store.remove(id)?;
            save_categories(config_path, &store)?;
            println!("{} {}", "Removed:".green(), removed.name);
        }
        CategoriesAction::Reset => {
            save_categories(config_path, &CategoryStore::builtin())?;
            println!(
                "{} {}",
                "Reset to builtin categories:".green(),
                config_path.display()
            );
        }
        CategoriesAction::Conflicts => {
            let classifier = load_classifier(config_path)?;
            let conflicts = classifier.conflicts();
            if conflicts.is_empty() {
                println!("No duplicate suffixes.");
                return Ok(());
            }

            println!();
            for conflict in conflicts.iter() {
                println!(
                    "  *.{}  {} -> {}",
                    conflict.suffix.yellow(),
                    conflict.previous.dimmed(),
                    conflict.winner.bold()
                );
            }
            println!();
        }
    }

    Ok(())
}

fn handle_config(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init => {
            if Config::init(config_path)? {
                println!("{} {}", "Initialized:".green(), config_path.display());
            } else {
                println!("{} {}", "Already exists:".yellow(), config_path.display());
            }
        }
    }

    Ok(())
}

fn print_category(category: &Category) {
    println!();
    println!(
        "  {} {}  {}",
        swatch(category.color),
        category.name.cyan().bold(),
        category.color.to_string().dimmed()
    );
    for (label, flag) in [
        ("case-sensitive", CaseSensitivity::Sensitive),
        ("case-insensitive", CaseSensitivity::Insensitive),
    ] {
        let suffixes = category.human_readable_suffixes(flag);
        if !suffixes.is_empty() {
            println!("    Suffixes ({}): {}", label, suffixes.join(" "));
        }
        let patterns: Vec<&str> = category
            .patterns()
            .iter()
            .filter(|p| p.case_sensitivity() == flag)
            .map(|p| p.source())
            .collect();
        if !patterns.is_empty() {
            println!("    Patterns ({}): {}", label, patterns.join(" "));
        }
    }
    println!();
}

fn rule_summary(category: &Category) -> String {
    let mut rules = category.human_readable_patterns(CaseSensitivity::Sensitive);
    rules.extend(category.human_readable_patterns(CaseSensitivity::Insensitive));
    if rules.is_empty() {
        return "(no rules)".dimmed().to_string();
    }
    rules.join(" ")
}

fn swatch(color: Rgb) -> String {
    "■".truecolor(color.r, color.g, color.b).to_string()
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "[ERROR]".red().bold(), e),
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
