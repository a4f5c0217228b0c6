//! ssget CLI
//!
//! One parameterized entry point replaces the original per-dataset download
//! scripts: the "square set" is the default invocation, the "small set" is
//! `--dtype real --max-nnz 100000 --sample-size 100 --seed 0`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ssget::{select_matrices, CatalogClient, Dtype, MatrixFetcher, RunConfig, SampleSpec};

/// Select and download matrices from the SuiteSparse collection
#[derive(Parser, Debug)]
#[command(name = "ssget")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data types to query, in order
    #[arg(long = "dtype", value_enum, default_values_t = [Dtype::Real, Dtype::Binary])]
    dtypes: Vec<Dtype>,

    /// Inclusive upper bound on non-zero count
    #[arg(long)]
    max_nnz: Option<u64>,

    /// Cap on the number of matrices selected across all data types
    #[arg(long, requires = "seed")]
    sample_size: Option<usize>,

    /// Seed for the reproducible candidate shuffle
    #[arg(long, requires = "sample_size")]
    seed: Option<u64>,

    /// Directory to extract the downloaded archives into
    #[arg(long, default_value = "matrices")]
    outdir: PathBuf,

    /// Select and report only; skip the download step
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let sample = match (self.sample_size, self.seed) {
            (Some(size), Some(seed)) => Some(SampleSpec { size, seed }),
            _ => None,
        };
        RunConfig {
            dtypes: self.dtypes.clone(),
            max_nnz: self.max_nnz,
            sample,
            outdir: self.outdir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ssget=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();

    let client = CatalogClient::default();
    let index = client
        .fetch_index()
        .await
        .context("Failed to load the catalog index")?;

    let selection = select_matrices(&index, &config);

    if cli.dry_run {
        info!("Dry run: skipping download of {} matrices", selection.len());
        return Ok(());
    }

    let fetcher = MatrixFetcher::new();
    fetcher
        .fetch_and_extract(&selection.entries, &config.outdir)
        .await
        .context("Failed to download the selected matrices")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_square_set() {
        let cli = Cli::try_parse_from(["ssget"]).unwrap();
        let config = cli.run_config();
        assert_eq!(config, RunConfig::square_set(PathBuf::from("matrices")));
    }

    #[test]
    fn test_cli_small_set_flags() {
        let cli = Cli::try_parse_from([
            "ssget",
            "--dtype",
            "real",
            "--max-nnz",
            "100000",
            "--sample-size",
            "100",
            "--seed",
            "0",
        ])
        .unwrap();
        let config = cli.run_config();
        assert_eq!(config, RunConfig::small_set(PathBuf::from("matrices")));
    }

    #[test]
    fn test_cli_sample_size_requires_seed() {
        let cli = Cli::try_parse_from(["ssget", "--sample-size", "100"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_seed_requires_sample_size() {
        let cli = Cli::try_parse_from(["ssget", "--seed", "0"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_custom_outdir() {
        let cli = Cli::try_parse_from(["ssget", "--outdir", "/tmp/mats"]).unwrap();
        assert_eq!(cli.outdir, PathBuf::from("/tmp/mats"));
    }
}
