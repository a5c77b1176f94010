//! SQL schema for the jobwatch SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Referential integrity between alerts, jobs, and companies is owned by the
/// ingestion pipeline, not the database; a dangling reference surfaces as a
/// missing-join error at read time.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS companies (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    title               TEXT NOT NULL,
    location            TEXT,
    normalized_location TEXT,
    url                 TEXT NOT NULL,
    company_id          INTEGER NOT NULL    -- references companies(id)
);

CREATE TABLE IF NOT EXISTS subscriptions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         TEXT NOT NULL,          -- hyphenated UUID
    filter_string   TEXT NOT NULL,
    company_id      INTEGER,                -- NULL = all companies
    location_filter TEXT
);

-- Alert rows are written by the ingestion pipeline; the engine only ever
-- stamps read_at.
CREATE TABLE IF NOT EXISTS alerts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    TEXT NOT NULL,
    job_id     INTEGER NOT NULL,            -- references jobs(id)
    created_at TEXT NOT NULL,               -- ISO 8601 UTC
    read_at    TEXT                         -- ISO 8601 UTC or NULL
);

CREATE INDEX IF NOT EXISTS subscriptions_user_idx ON subscriptions(user_id);
CREATE INDEX IF NOT EXISTS alerts_user_idx        ON alerts(user_id);
CREATE INDEX IF NOT EXISTS alerts_created_idx     ON alerts(created_at);

PRAGMA user_version = 1;
";
