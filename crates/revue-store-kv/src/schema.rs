//! SQL schema for the SQLite key-value host.
//!
//! Executed once at connection startup. The version is recorded in
//! `PRAGMA user_version` for any future migration to key off.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per storage key; values are opaque text documents.
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

PRAGMA user_version = 1;
";
