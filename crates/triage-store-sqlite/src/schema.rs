//! SQL schema for the triage SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS patients (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL,
    age             INTEGER NOT NULL CHECK (age > 0),
    symptoms        TEXT    NOT NULL,
    pain_level      INTEGER NOT NULL CHECK (pain_level BETWEEN 1 AND 10),
    notes           TEXT,
    priority_class  INTEGER NOT NULL,
    status          TEXT    NOT NULL DEFAULT 'waiting',
    created_at      TEXT    NOT NULL,   -- fixed-width RFC 3339 UTC; never updated
    updated_at      TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS patients_status_idx  ON patients(status);
CREATE INDEX IF NOT EXISTS patients_created_idx ON patients(created_at);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` and `RETURNING` clause, in the order
/// [`crate::encode::raw_patient`] reads them.
pub const PATIENT_COLUMNS: &str = "id, name, age, symptoms, pain_level, notes, \
                                   priority_class, status, created_at, updated_at";
