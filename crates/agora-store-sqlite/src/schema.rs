//! SQL schema for the Agora SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Keyed by name; rows are only ever inserted.
CREATE TABLE IF NOT EXISTS sources (
    name  TEXT PRIMARY KEY,
    text  TEXT,
    url   TEXT
);

-- Statements are never updated or deleted.
-- counter_statement points a rebuttal at the statement it opposes.
CREATE TABLE IF NOT EXISTS statements (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    text              TEXT    NOT NULL,
    counter_statement INTEGER REFERENCES statements(id),
    source            TEXT    REFERENCES sources(name),
    recorded_at       TEXT    NOT NULL,   -- ISO 8601 UTC; server-assigned
    CHECK (length(trim(text)) > 0 AND length(text) <= 1024)
);

CREATE TABLE IF NOT EXISTS arguments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    claim       INTEGER NOT NULL REFERENCES statements(id),
    source      TEXT    REFERENCES sources(name),
    recorded_at TEXT    NOT NULL
);

-- Statement `premise` justifies argument `argument`.
CREATE TABLE IF NOT EXISTS premises (
    argument INTEGER NOT NULL REFERENCES arguments(id),
    premise  INTEGER NOT NULL REFERENCES statements(id),
    PRIMARY KEY (argument, premise)
);

CREATE TABLE IF NOT EXISTS topics (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL UNIQUE,
    argument INTEGER NOT NULL REFERENCES arguments(id)
);

CREATE INDEX IF NOT EXISTS statements_counter_idx ON statements(counter_statement);
CREATE INDEX IF NOT EXISTS arguments_claim_idx    ON arguments(claim);
CREATE INDEX IF NOT EXISTS premises_premise_idx   ON premises(premise);

PRAGMA user_version = 1;
";
