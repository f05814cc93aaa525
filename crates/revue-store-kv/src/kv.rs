//! The [`KeyValueStore`] port and an in-memory host.

use std::collections::HashMap;

use thiserror::Error;

// ─── Port ────────────────────────────────────────────────────────────────────

/// The three primitives the catalog needs from its host: string keys mapped
/// to text values.
///
/// Hosts are expected to apply each `set` or `remove` atomically; nothing
/// beyond that is assumed.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The text stored under `key`, or `None` if the key was never written or
  /// has been removed.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Remove `key`. Removing an absent key is not an error.
  fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
  type Error = S::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get(key)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set(key, value)
  }

  fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
    (**self).remove(key)
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("quota exceeded writing {key:?}: {needed} bytes needed, quota is {quota}")]
  QuotaExceeded {
    key:    String,
    needed: usize,
    quota:  usize,
  },
}

/// A `HashMap`-backed host, optionally with a byte quota on the total size
/// of keys and values (mirroring the quota of a browser's local storage).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: HashMap<String, String>,
  quota:   Option<usize>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store that rejects any write pushing its total size past `bytes`.
  pub fn with_quota(bytes: usize) -> Self {
    Self { entries: HashMap::new(), quota: Some(bytes) }
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }

  fn used_bytes_without(&self, key: &str) -> usize {
    self
      .entries
      .iter()
      .filter(|(k, _)| k.as_str() != key)
      .map(|(k, v)| k.len() + v.len())
      .sum()
  }
}

impl KeyValueStore for MemoryStore {
  type Error = MemoryError;

  fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), MemoryError> {
    if let Some(quota) = self.quota {
      let needed = self.used_bytes_without(key) + key.len() + value.len();
      if needed > quota {
        return Err(MemoryError::QuotaExceeded {
          key: key.to_owned(),
          needed,
          quota,
        });
      }
    }
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<(), MemoryError> {
    self.entries.remove(key);
    Ok(())
  }
}
