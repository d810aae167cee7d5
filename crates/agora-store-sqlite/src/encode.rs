//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Surrogate ids are stored as
//! SQLite integers; source references are the source name.

use agora_core::{
  ArgumentId, StatementId, TopicId,
  argument::Argument,
  source::Source,
  statement::Statement,
  topic::Topic,
};
use chrono::{DateTime, Utc};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Column lists ────────────────────────────────────────────────────────────

pub const STATEMENT_COLUMNS: &str = "id, text, counter_statement, source, recorded_at";
pub const ARGUMENT_COLUMNS: &str = "id, claim, source, recorded_at";

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `statements` row as read, with the timestamp still encoded.
pub struct RawStatement {
  pub id:                i64,
  pub text:              String,
  pub counter_statement: Option<i64>,
  pub source:            Option<String>,
  pub recorded_at:       String,
}

impl RawStatement {
  /// Read a row selected with [`STATEMENT_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      text:              row.get(1)?,
      counter_statement: row.get(2)?,
      source:            row.get(3)?,
      recorded_at:       row.get(4)?,
    })
  }

  pub fn into_statement(self) -> Result<Statement> {
    Ok(Statement {
      id:                StatementId(self.id),
      text:              self.text,
      counter_statement: self.counter_statement.map(StatementId),
      source:            self.source,
      recorded_at:       decode_dt(&self.recorded_at)?,
    })
  }
}

/// An `arguments` row as read, with the timestamp still encoded.
pub struct RawArgument {
  pub id:          i64,
  pub claim:       i64,
  pub source:      Option<String>,
  pub recorded_at: String,
}

impl RawArgument {
  /// Read a row selected with [`ARGUMENT_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      claim:       row.get(1)?,
      source:      row.get(2)?,
      recorded_at: row.get(3)?,
    })
  }

  pub fn into_argument(self) -> Result<Argument> {
    Ok(Argument {
      id:          ArgumentId(self.id),
      claim:       StatementId(self.claim),
      source:      self.source,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Read a `sources` row selected as `name, text, url`.
pub fn source_from_row(row: &Row<'_>) -> rusqlite::Result<Source> {
  Ok(Source {
    name: row.get(0)?,
    text: row.get(1)?,
    url:  row.get(2)?,
  })
}

/// Read a `topics` row selected as `id, name, argument`.
pub fn topic_from_row(row: &Row<'_>) -> rusqlite::Result<Topic> {
  Ok(Topic {
    id:       TopicId(row.get(0)?),
    name:     row.get(1)?,
    argument: ArgumentId(row.get(2)?),
  })
}

pub fn decode_statements(raws: Vec<RawStatement>) -> Result<Vec<Statement>> {
  raws.into_iter().map(RawStatement::into_statement).collect()
}

pub fn decode_arguments(raws: Vec<RawArgument>) -> Result<Vec<Argument>> {
  raws.into_iter().map(RawArgument::into_argument).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bad_dt_is_a_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
