//! SQL schema for the Marquee SQLite store.

/// Full DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
/// An existing table is never altered.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS movies (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    title    TEXT,
    year     INTEGER,
    genre    TEXT,
    rating   REAL,
    director TEXT,
    star1    TEXT,
    star2    TEXT,
    star3    TEXT
);
";
