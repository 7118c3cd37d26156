//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT    NOT NULL,
    middle_name   TEXT,
    last_name     TEXT    NOT NULL,
    date_of_birth TEXT,                       -- YYYY-MM-DD or NULL
    email         TEXT,
    phone         TEXT,
    is_active     INTEGER NOT NULL DEFAULT 0  -- 0 | 1
);

CREATE TABLE IF NOT EXISTS users (
    user_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT,
    last_name   TEXT,
    email       TEXT,
    phone       TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    permissions TEXT                          -- level name; NULL or '' = None
);

CREATE INDEX IF NOT EXISTS contacts_active_idx ON contacts(is_active);

PRAGMA user_version = 1;
";
