//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS department (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Deleting a department that still has sellers fails; nothing cascades.
CREATE TABLE IF NOT EXISTS seller (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    email         TEXT    NOT NULL,
    birth_date    TEXT    NOT NULL,   -- ISO 8601 calendar date
    base_salary   REAL    NOT NULL,
    department_id INTEGER NOT NULL REFERENCES department(id)
);

CREATE INDEX IF NOT EXISTS seller_department_idx ON seller(department_id);

PRAGMA user_version = 1;
";
