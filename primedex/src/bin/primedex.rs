//! primedex command-line entry point
//!
//! Thin wrapper around the library: parses arguments, installs logging,
//! resolves configuration, then builds, queries or inspects a prime cache.
//! Logs go to stderr; stdout carries the console protocol.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use primedex::{ArtifactStore, IoChannel, PrimeEngine, PrimedexConfig, QueryService};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Sieve primes up to a bound, cache them on disk and query them interactively")]
struct Cli {
    /// Directory holding cached prime artifacts
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build (or load) the primes up to a bound and print a summary
    Build {
        /// Inclusive upper bound
        #[arg(long)]
        bound: Option<u64>,
    },
    /// Build (or load) the primes, then answer queries on stdin/stdout
    Query {
        /// Inclusive upper bound
        #[arg(long)]
        bound: Option<u64>,
    },
    /// Show the manifest of a cached artifact set
    Info {
        /// Inclusive upper bound
        #[arg(long)]
        bound: Option<u64>,
    },
}

impl Commands {
    fn bound(&self) -> Option<u64> {
        match self {
            Commands::Build { bound } | Commands::Query { bound } | Commands::Info { bound } => {
                *bound
            }
        }
    }
}

impl Cli {
    /// File config (or defaults) with command-line overrides applied
    fn resolve_config(&self) -> Result<PrimedexConfig> {
        let mut config = match &self.config {
            Some(path) => PrimedexConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => PrimedexConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir.clone());
        }
        if let Some(bound) = self.command.bound() {
            config = config.with_bound(bound);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve_config()?;
    tracing::debug!(?config, "configuration resolved");

    match &cli.command {
        Commands::Build { .. } => handle_build(&config),
        Commands::Query { .. } => handle_query(&config),
        Commands::Info { .. } => handle_info(&config),
    }
}

fn handle_build(config: &PrimedexConfig) -> Result<()> {
    let start_time = Instant::now();
    let engine = PrimeEngine::from_config(config);
    let (set, provenance) = engine
        .prepare(config.bound)
        .with_context(|| format!("preparing primes up to {}", config.bound))?;

    let store = set.store();
    println!("Primes up to {} ({provenance}):", config.bound);
    println!("  primes greater than 2: {}", store.len());
    match store.max_prime() {
        Some(max_prime) => println!("  largest prime: {max_prime}"),
        None => println!("  largest prime: none"),
    }
    println!("  bitmap size: {} bytes", set.bitmap().byte_size());
    println!("  data directory: {}", engine.store().data_dir().display());
    println!("Completed in {:.2?}", start_time.elapsed());
    Ok(())
}

fn handle_query(config: &PrimedexConfig) -> Result<()> {
    let engine = PrimeEngine::from_config(config);
    let (set, _) = engine
        .prepare(config.bound)
        .with_context(|| format!("preparing primes up to {}", config.bound))?;

    let summary = QueryService::new(set.store(), IoChannel::stdio())
        .run()
        .context("query console failed")?;
    tracing::info!(
        index_queries = summary.index_queries,
        primality_queries = summary.primality_queries,
        rejected_inputs = summary.rejected_inputs,
        "query session ended"
    );
    Ok(())
}

fn handle_info(config: &PrimedexConfig) -> Result<()> {
    let engine = PrimeEngine::from_config(config);
    let disk = engine.store();
    if !disk.exists(config.bound) {
        println!(
            "No cached primes for bound {} in {}",
            config.bound,
            disk.data_dir().display()
        );
        return Ok(());
    }

    let manifest = disk
        .read_manifest(config.bound)
        .with_context(|| format!("reading manifest for bound {}", config.bound))?;
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    if !manifest.is_current_for(config.bound) {
        println!("(stale: will be rebuilt on next build)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_globals() {
        let cli = Cli::try_parse_from([
            "primedex", "build", "--bound", "20", "--data-dir", "cache", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("cache")));
        assert!(matches!(cli.command, Commands::Build { bound: Some(20) }));
    }

    #[test]
    fn test_bound_is_optional() {
        let cli = Cli::try_parse_from(["primedex", "query"]).unwrap();
        assert_eq!(cli.command.bound(), None);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, PrimedexConfig::default());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primedex.json");
        std::fs::write(&path, r#"{ "bound": 500, "data_dir": "from-file" }"#).unwrap();

        let cli = Cli::try_parse_from([
            "primedex",
            "--config",
            path.to_str().unwrap(),
            "info",
            "--bound",
            "30",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.bound, 30);
        assert_eq!(config.data_dir, PathBuf::from("from-file"));
    }

    #[test]
    fn test_rejects_unknown_subcommand_and_bad_bound() {
        assert!(Cli::try_parse_from(["primedex", "serve"]).is_err());
        assert!(Cli::try_parse_from(["primedex", "build", "--bound", "-5"]).is_err());
    }
}
