//! Error type for `revue-store-kv`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] revue_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// The text stored under `key` is not a valid collection document.
  #[error("malformed data under {key:?}: {source}")]
  Decode {
    key:    String,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode collection: {0}")]
  Encode(#[source] serde_json::Error),

  /// A failure reported by the key-value host itself (e.g. quota exceeded).
  #[error("storage host error: {0}")]
  Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn host<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Host(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
