//! Synchronous statements shared by the one-shot calls in [`crate::store`] and
//! the transactional view handed out by `atomically`.
//!
//! Every function takes a plain `&Connection`; a `&Transaction` derefs to one,
//! so the same SQL runs inside and outside a unit of work.

use rusqlite::{Connection, OptionalExtension as _, params};

use agora_core::{source::Source, topic::Topic};

use crate::encode::{
  ARGUMENT_COLUMNS, RawArgument, RawStatement, STATEMENT_COLUMNS, source_from_row,
  topic_from_row,
};

// ─── Sources ─────────────────────────────────────────────────────────────────

pub fn get_source(conn: &Connection, name: &str) -> rusqlite::Result<Option<Source>> {
  conn
    .query_row(
      "SELECT name, text, url FROM sources WHERE name = ?1",
      params![name],
      source_from_row,
    )
    .optional()
}

/// Conditional insert guarded by the primary key, then fetch. Never reads
/// before writing, so two writers racing on one name both see the same row.
pub fn get_or_create_source(conn: &Connection, name: &str) -> rusqlite::Result<Source> {
  put_source(conn, &Source::named(name))
}

pub fn put_source(conn: &Connection, source: &Source) -> rusqlite::Result<Source> {
  conn.execute(
    "INSERT INTO sources (name, text, url) VALUES (?1, ?2, ?3)
     ON CONFLICT(name) DO NOTHING",
    params![source.name, source.text, source.url],
  )?;
  conn.query_row(
    "SELECT name, text, url FROM sources WHERE name = ?1",
    params![source.name],
    source_from_row,
  )
}

// ─── Statements ──────────────────────────────────────────────────────────────

pub fn get_statement(conn: &Connection, id: i64) -> rusqlite::Result<Option<RawStatement>> {
  conn
    .query_row(
      &format!("SELECT {STATEMENT_COLUMNS} FROM statements WHERE id = ?1"),
      params![id],
      RawStatement::from_row,
    )
    .optional()
}

/// Insert a statement row and return its generated id.
pub fn insert_statement(
  conn: &Connection,
  text: &str,
  counter_statement: Option<i64>,
  source: Option<&str>,
  recorded_at: &str,
) -> rusqlite::Result<i64> {
  conn.execute(
    "INSERT INTO statements (text, counter_statement, source, recorded_at)
     VALUES (?1, ?2, ?3, ?4)",
    params![text, counter_statement, source, recorded_at],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn rebuttals_of(conn: &Connection, target: i64) -> rusqlite::Result<Vec<RawStatement>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {STATEMENT_COLUMNS} FROM statements
     WHERE counter_statement = ?1
     ORDER BY id"
  ))?;
  stmt
    .query_map(params![target], RawStatement::from_row)?
    .collect()
}

// ─── Arguments ───────────────────────────────────────────────────────────────

pub fn get_argument(conn: &Connection, id: i64) -> rusqlite::Result<Option<RawArgument>> {
  conn
    .query_row(
      &format!("SELECT {ARGUMENT_COLUMNS} FROM arguments WHERE id = ?1"),
      params![id],
      RawArgument::from_row,
    )
    .optional()
}

/// Insert an argument row and return its generated id.
pub fn insert_argument(
  conn: &Connection,
  claim: i64,
  source: Option<&str>,
  recorded_at: &str,
) -> rusqlite::Result<i64> {
  conn.execute(
    "INSERT INTO arguments (claim, source, recorded_at) VALUES (?1, ?2, ?3)",
    params![claim, source, recorded_at],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn arguments_by_claim(conn: &Connection, claim: i64) -> rusqlite::Result<Vec<RawArgument>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {ARGUMENT_COLUMNS} FROM arguments WHERE claim = ?1 ORDER BY id"
  ))?;
  stmt
    .query_map(params![claim], RawArgument::from_row)?
    .collect()
}

pub fn first_argument_by_claim(
  conn: &Connection,
  claim: i64,
) -> rusqlite::Result<Option<RawArgument>> {
  conn
    .query_row(
      &format!(
        "SELECT {ARGUMENT_COLUMNS} FROM arguments WHERE claim = ?1 ORDER BY id LIMIT 1"
      ),
      params![claim],
      RawArgument::from_row,
    )
    .optional()
}

// ─── Premises ────────────────────────────────────────────────────────────────

pub fn link_premise(conn: &Connection, argument: i64, premise: i64) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO premises (argument, premise) VALUES (?1, ?2)
     ON CONFLICT(argument, premise) DO NOTHING",
    params![argument, premise],
  )?;
  Ok(())
}

pub fn premises_of(conn: &Connection, argument: i64) -> rusqlite::Result<Vec<RawStatement>> {
  let mut stmt = conn.prepare(
    "SELECT s.id, s.text, s.counter_statement, s.source, s.recorded_at
     FROM premises p
     JOIN statements s ON s.id = p.premise
     WHERE p.argument = ?1
     ORDER BY s.id",
  )?;
  stmt
    .query_map(params![argument], RawStatement::from_row)?
    .collect()
}

// ─── Topics ──────────────────────────────────────────────────────────────────

pub fn find_topic(conn: &Connection, name: &str) -> rusqlite::Result<Option<Topic>> {
  conn
    .query_row(
      "SELECT id, name, argument FROM topics WHERE name = ?1",
      params![name],
      topic_from_row,
    )
    .optional()
}

pub fn insert_topic(conn: &Connection, name: &str, argument: i64) -> rusqlite::Result<i64> {
  conn.execute(
    "INSERT INTO topics (name, argument) VALUES (?1, ?2)",
    params![name, argument],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn list_topics(conn: &Connection) -> rusqlite::Result<Vec<Topic>> {
  let mut stmt = conn.prepare("SELECT id, name, argument FROM topics ORDER BY id")?;
  stmt.query_map([], topic_from_row)?.collect()
}
