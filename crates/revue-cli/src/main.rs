//! `revue` — command-line front end for the revue review catalog.
//!
//! Every command prints its result as pretty JSON on stdout; logs go to
//! stderr.
//!
//! # Usage
//!
//! ```text
//! revue items
//! revue review add 1 --user "Ann" --rating 5 --category cleanliness=4
//! revue --store ~/hotels.db item show 1
//! ```

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use revue_store_kv::{KvCatalog, SqliteStore};
use settings::{Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "revue", version, about = "Review catalog with derived ratings")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "revue.toml")]
  config: PathBuf,

  /// SQLite store file; overrides `store_path` from the configuration.
  #[arg(long, env = "REVUE_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(settings.store_path.as_path()));
  let store = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = ?store_path, "opened store");

  let mut catalog = KvCatalog::open(store, settings.catalog_options())
    .context("failed to initialise catalog")?;

  let output = commands::run(&mut catalog, cli.command)?;
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}
