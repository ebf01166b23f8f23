//! SQL schema for the patient SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per patient, active or inactive.
-- `email` is the authoritative uniqueness guard for concurrent writers.
CREATE TABLE IF NOT EXISTS patients (
    patient_id       TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    email            TEXT NOT NULL UNIQUE,
    address          TEXT NOT NULL,
    date_of_birth    TEXT NOT NULL,   -- ISO 8601 calendar date
    registered_date  TEXT NOT NULL,   -- ISO 8601 calendar date
    status           TEXT NOT NULL DEFAULT 'ACTIVE'
                     CHECK (status IN ('ACTIVE', 'INACTIVE')),
    deactivated_date TEXT,            -- set iff status = 'INACTIVE'
    CHECK ((status = 'INACTIVE') = (deactivated_date IS NOT NULL))
);

PRAGMA user_version = 1;
";
