//! Statements — the nodes of the debate graph.
//!
//! A statement is an immutable piece of text. Its role (claim, premise,
//! rebuttal) is never stored on the statement itself; it follows from the
//! rows that reference it. The one structural edge it does carry is
//! `counter_statement`, which points a rebuttal at the statement it opposes
//! and so forms a forest rooted at the un-rebutting claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, StatementId};

/// Upper bound on statement text, in characters, after trimming.
pub const MAX_TEXT_LEN: usize = 1024;

/// A persisted statement. Once written, no field is ever updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
  pub id:                StatementId,
  pub text:              String,
  /// The statement this one rebuts, if any.
  pub counter_statement: Option<StatementId>,
  /// Name of the attributed [`Source`](crate::source::Source).
  pub source:            Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at:       DateTime<Utc>,
}

/// Input to [`crate::store::GraphStore::create_statement`].
/// `id` and `recorded_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatement {
  pub text:              String,
  pub counter_statement: Option<StatementId>,
  pub source:            Option<String>,
}

impl NewStatement {
  /// A root statement with no source and nothing to rebut.
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), counter_statement: None, source: None }
  }
}

/// The `{id, text, source}` projection returned by the lookup operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementView {
  pub id:     StatementId,
  pub text:   String,
  pub source: Option<String>,
}

impl From<Statement> for StatementView {
  fn from(s: Statement) -> Self {
    Self { id: s.id, text: s.text, source: s.source }
  }
}

/// Trim `raw` and check it against the statement text invariants.
///
/// Returns the trimmed text, which is what gets stored.
pub fn normalize_text(raw: &str) -> Result<String> {
  let text = raw.trim();
  if text.is_empty() {
    return Err(Error::Invalid("text must not be blank".into()));
  }
  let len = text.chars().count();
  if len > MAX_TEXT_LEN {
    return Err(Error::Invalid(format!(
      "text is {len} characters long; the limit is {MAX_TEXT_LEN}"
    )));
  }
  Ok(text.to_owned())
}
