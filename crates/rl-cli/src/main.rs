//! CLI entry point for the relink tool.
//!
//! This binary snapshots directories, matches two snapshots against each
//! other, and shows how import references would be rewritten. Nothing is
//! ever written back to the scanned trees.
//!
//! # Usage
//!
//! ```bash
//! relink [OPTIONS] <COMMAND>
//!
//! # Save a catalog of the tree before a refactor
//! relink snapshot ./src --output before.json
//!
//! # Compare it with the tree after the refactor
//! relink diff before.json ./src --strategy both --ambiguous
//!
//! # Show the patched content of every affected file
//! relink rewrite before.json ./src
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use rl_core::{Catalog, Config, MatchStrategy, MigrationRecord};
use rl_matcher::KeyReport;
use rl_rewrite::Rewriter;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Detects moved files between two snapshots and rewrites import paths.
#[derive(Parser)]
#[command(name = "relink", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "RELINK_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Additional directory or file name to skip while scanning (repeatable).
    #[arg(long = "ignore", value_name = "NAME", global = true)]
    ignore: Vec<String>,

    /// Scan sibling subdirectories in parallel.
    #[arg(long, global = true)]
    parallel: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Snapshot a directory and print its catalog as JSON.
    Snapshot {
        /// Directory to snapshot.
        root: Utf8PathBuf,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Match two snapshots and print the migration records.
    Diff {
        /// "Before" directory or saved catalog.
        before: Utf8PathBuf,

        /// "After" directory or saved catalog.
        after: Utf8PathBuf,

        /// Identity used to pair files (defaults to the configured strategy).
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Also report keys with several candidates.
        #[arg(long)]
        ambiguous: bool,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Match two snapshots and print the rewritten text files.
    Rewrite {
        /// "Before" directory or saved catalog.
        before: Utf8PathBuf,

        /// "After" directory or saved catalog (must carry file content).
        after: Utf8PathBuf,

        /// Identity used to pair files (defaults to the configured strategy).
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Matching strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Pair files with identical content.
    Hash,
    /// Pair files with the same name (without extension).
    Filename,
    /// Hash first, then filename for unpaired files.
    Both,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Hash => Self::Hash,
            StrategyArg::Filename => Self::Filename,
            StrategyArg::Both => Self::Both,
        }
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so that
/// JSON on stdout stays the only output. Logs go to stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the result is
/// invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("Failed to load config from {path}"))?,
        None => Config::default(),
    };

    for name in &cli.ignore {
        if !config.scan.ignore.contains(name) {
            config.scan.ignore.push(name.clone());
        }
    }
    config.scan.parallel |= cli.parallel;

    config.validate()?;
    Ok(config)
}

/// Loads a catalog from a directory (by scanning it) or a saved JSON file.
///
/// # Errors
///
/// Returns an error if the path does not exist, the scan fails, or the file
/// is not a valid catalog.
fn load_catalog(path: &Utf8Path, config: &Config) -> color_eyre::Result<Catalog> {
    if path.is_dir() {
        return rl_scanner::snapshot(path, &config.scan)?
            .ok_or_else(|| eyre!("Path is not a directory: {path}"));
    }

    if !path.exists() {
        return Err(eyre!("Path does not exist: {path}"));
    }

    let json = std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path}"))?;
    let catalog = Catalog::from_json(&json).wrap_err_with(|| format!("Failed to load catalog {path}"))?;
    info!(path = %path, entries = catalog.len(), "Loaded saved catalog");
    Ok(catalog)
}

/// Loads both catalogs and matches them.
fn diff_catalogs(
    before: &Utf8Path,
    after: &Utf8Path,
    strategy: MatchStrategy,
    config: &Config,
) -> color_eyre::Result<(Catalog, Catalog, Vec<MigrationRecord>)> {
    let before = load_catalog(before, config)?;
    let after = load_catalog(after, config)?;
    let records = rl_matcher::match_catalogs(&before, &after, strategy);
    Ok((before, after, records))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Scans `root` and emits its catalog.
fn run_snapshot(config: &Config, root: &Utf8Path, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    info!(root = %root, "Starting snapshot");

    let catalog = rl_scanner::snapshot(root, &config.scan)?
        .ok_or_else(|| eyre!("Path is not a directory: {root}"))?;

    emit(&catalog, output)
}

/// Diff output.
#[derive(Serialize)]
struct DiffReport<'a> {
    strategy: MatchStrategy,
    records: &'a [MigrationRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    ambiguous: Option<Vec<KeyReport>>,
}

/// Matches two snapshots and emits the records.
fn run_diff(
    config: &Config,
    before: &Utf8Path,
    after: &Utf8Path,
    strategy: MatchStrategy,
    ambiguous: bool,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    let (before, after, records) = diff_catalogs(before, after, strategy, config)?;

    let report = DiffReport {
        strategy,
        records: &records,
        ambiguous: ambiguous.then(|| rl_matcher::ambiguities(&before, &after, strategy)),
    };

    emit(&report, output)
}

/// Matches two snapshots and emits the patched files.
fn run_rewrite(
    config: &Config,
    before: &Utf8Path,
    after: &Utf8Path,
    strategy: MatchStrategy,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    let (_, after, records) = diff_catalogs(before, after, strategy, config)?;

    let rewriter = Rewriter::new(config.rewrite.clone())?;
    let patched = rewriter.rewrite_catalog(&after, &records)?;

    emit(&patched, output)
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Writes `value` as pretty JSON to `output`, or stdout.
fn emit<T: Serialize>(value: &T, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| eyre!("Failed to serialize JSON: {}", e))?;

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), format!("{json}\n"))
            .wrap_err_with(|| format!("Failed to write {output_path}"))?;
        info!(path = %output_path, "Output written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{json}")?;
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Merge config file and overrides
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Snapshot { root, output } => run_snapshot(&config, root, output.as_deref()),
        Commands::Diff {
            before,
            after,
            strategy,
            ambiguous,
            output,
        } => {
            let strategy = strategy.map_or(config.matching.strategy, MatchStrategy::from);
            run_diff(&config, before, after, strategy, *ambiguous, output.as_deref())
        }
        Commands::Rewrite {
            before,
            after,
            strategy,
            output,
        } => {
            let strategy = strategy.map_or(config.matching.strategy, MatchStrategy::from);
            run_rewrite(&config, before, after, strategy, output.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "relink", "diff", "a", "b", "--strategy", "both", "--ignore", "dist", "--ignore", "out",
            "--parallel",
        ])
        .unwrap();

        assert_eq!(cli.ignore, vec!["dist", "out"]);
        assert!(cli.parallel);
        match cli.command {
            Commands::Diff { strategy, ambiguous, .. } => {
                assert_eq!(strategy, Some(StrategyArg::Both));
                assert!(!ambiguous);
            }
            _ => panic!("expected diff"),
        }
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let cli = Cli::try_parse_from(["relink", "snapshot", ".", "--ignore", "dist", "--parallel"]).unwrap();
        let config = build_config(&cli).unwrap();

        assert!(config.scan.is_ignored("dist"));
        assert!(config.scan.is_ignored("node_modules"));
        assert!(config.scan.parallel);
    }

    #[test]
    fn test_build_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relink.json");
        fs::write(&path, r#"{"matching": {"strategy": "filename"}}"#).unwrap();

        let cli = Cli::try_parse_from(["relink", "--config", path.to_str().unwrap(), "snapshot", "."]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.matching.strategy, MatchStrategy::Filename);
    }

    #[test]
    fn test_load_catalog_from_dir_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("src")).unwrap();
        fs::write(tree.join("src/util.js"), "export {};\n").unwrap();

        let config = Config::default();
        let tree = Utf8Path::from_path(&tree).unwrap();
        let scanned = load_catalog(tree, &config).unwrap();
        assert_eq!(scanned.len(), 2);

        let saved = dir.path().join("catalog.json");
        fs::write(&saved, serde_json::to_string(&scanned).unwrap()).unwrap();
        let loaded = load_catalog(Utf8Path::from_path(&saved).unwrap(), &config).unwrap();
        assert_eq!(loaded, scanned);
    }

    #[test]
    fn test_load_catalog_missing_path() {
        let err = load_catalog(Utf8Path::new("/nonexistent/relink.json"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_rewrite_between_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let before = dir.path().join("before");
        let after = dir.path().join("after");
        fs::create_dir_all(before.join("src")).unwrap();
        fs::create_dir_all(after.join("src/lib")).unwrap();

        let index = "import { x } from \"./util\";\n";
        let util = "export const x = 1;\n";
        fs::write(before.join("src/index.js"), index).unwrap();
        fs::write(before.join("src/util.js"), util).unwrap();
        fs::write(after.join("src/index.js"), index).unwrap();
        fs::write(after.join("src/lib/util.js"), util).unwrap();

        let config = Config::default();
        let (_, after, records) = diff_catalogs(
            Utf8Path::from_path(&before).unwrap(),
            Utf8Path::from_path(&after).unwrap(),
            MatchStrategy::Hash,
            &config,
        )
        .unwrap();

        let moved: Vec<_> = records.iter().filter(|r| r.migrated).collect();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].to_path, "src/lib/util.js");

        let patched = Rewriter::new(config.rewrite)
            .unwrap()
            .rewrite_catalog(&after, &records)
            .unwrap();
        assert_eq!(patched.len(), 1);
        assert_eq!(patched[0].content, "import { x } from \"./lib/util\";\n");
    }
}
