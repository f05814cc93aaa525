//! Error types for `revue-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("item not found: {0}")]
  ItemNotFound(u64),

  #[error("{field} must be between 1 and 5, got {value}")]
  RatingOutOfRange { field: String, value: u8 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
