//! [`SqliteStore`] — a durable [`KeyValueStore`] host in a single SQLite file.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};

use crate::{KeyValueStore, Result, schema::SCHEMA};

/// A key-value host backed by one `kv` table.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    Self::init(conn)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// All keys currently present, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
    let keys = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }
}

impl KeyValueStore for SqliteStore {
  type Error = rusqlite::Error;

  fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
    self
      .conn
      .query_row(
        "SELECT value FROM kv WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()
  }

  fn set(&mut self, key: &str, value: &str) -> rusqlite::Result<()> {
    self.conn.execute(
      "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
      rusqlite::params![key, value],
    )?;
    Ok(())
  }

  fn remove(&mut self, key: &str) -> rusqlite::Result<()> {
    self
      .conn
      .execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }
}
