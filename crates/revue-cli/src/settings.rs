//! Layered configuration: defaults, then an optional TOML file, then
//! `REVUE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use revue_core::catalog::CatalogOptions;
use serde::Deserialize;

/// Shape of `revue.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite file holding the key-value store. `~` is expanded.
  pub store_path:                 PathBuf,
  pub items_key:                  String,
  pub reviews_key:                String,
  pub recompute_on_review_update: bool,
}

impl Default for Settings {
  fn default() -> Self {
    let options = CatalogOptions::default();
    Self {
      store_path:                 PathBuf::from("revue.db"),
      items_key:                  options.items_key,
      reviews_key:                options.reviews_key,
      recompute_on_review_update: options.recompute_on_review_update,
    }
  }
}

impl Settings {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("REVUE").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    raw
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn catalog_options(&self) -> CatalogOptions {
    CatalogOptions {
      items_key:                  self.items_key.clone(),
      reviews_key:                self.reviews_key.clone(),
      recompute_on_review_update: self.recompute_on_review_update,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
