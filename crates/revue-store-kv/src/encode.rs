//! Encoding and decoding of whole collections to and from the JSON text
//! stored under a single key.

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Parse the document stored under `key`. A malformed document is an error;
/// it is never silently replaced by an empty collection.
pub fn decode_collection<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Vec<T>> {
  serde_json::from_str(raw).map_err(|source| Error::Decode {
    key: key.to_owned(),
    source,
  })
}

pub fn encode_collection<T: Serialize>(records: &[T]) -> Result<String> {
  serde_json::to_string(records).map_err(Error::Encode)
}

/// One greater than the largest id present, or 1 for an empty collection.
pub fn next_id(ids: impl IntoIterator<Item = u64>) -> u64 {
  ids.into_iter().max().map_or(1, |max| max + 1)
}
