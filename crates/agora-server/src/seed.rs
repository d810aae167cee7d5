//! Loading an initial graph from a JSON document.
//!
//! Statements and arguments are referred to by document-local keys that are
//! resolved to generated ids in document order, so a statement can only
//! counter, and an argument can only cite, statements listed before it.
//! The whole document is written in one transaction.
//!
//! A document whose topics all exist already has been applied before and is
//! skipped entirely, so restarting with the same seed adds nothing.

use std::{collections::HashMap, path::Path};

use agora_core::{
  ArgumentId, StatementId,
  argument::NewArgument,
  source::Source,
  statement::{NewStatement, normalize_text},
  store::{GraphStore, GraphTx},
};
use serde::Deserialize;
use thiserror::Error;

// ─── Document ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedDocument {
  pub sources:    Vec<Source>,
  pub statements: Vec<SeedStatement>,
  pub arguments:  Vec<SeedArgument>,
  pub topics:     Vec<SeedTopic>,
}

#[derive(Debug, Deserialize)]
pub struct SeedStatement {
  pub key:      String,
  pub text:     String,
  pub source:   Option<String>,
  /// Key of an earlier statement this one rebuts.
  pub counters: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedArgument {
  pub key:      String,
  pub claim:    String,
  pub source:   Option<String>,
  #[serde(default)]
  pub premises: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTopic {
  pub name:     String,
  pub argument: String,
}

/// Rows written by [`apply`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
  pub sources:    usize,
  pub statements: usize,
  pub arguments:  usize,
  pub premises:   usize,
  pub topics:     usize,
  /// Topics left alone because one with the same name already existed.
  pub skipped:    usize,
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("failed to read seed file: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed seed document: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Graph(#[from] agora_core::Error),
}

// ─── Loading ──────────────────────────────────────────────────────────────────

pub fn parse(json: &str) -> Result<SeedDocument, SeedError> {
  Ok(serde_json::from_str(json)?)
}

pub async fn load(path: &Path) -> Result<SeedDocument, SeedError> {
  let json = tokio::fs::read_to_string(path).await?;
  parse(&json)
}

/// Write `doc` into `store`. Nothing is written if any part of it fails.
pub async fn apply<S>(store: &S, doc: SeedDocument) -> Result<SeedReport, SeedError>
where
  S: GraphStore,
{
  let report = store
    .atomically(move |tx| write(tx, doc))
    .await
    .map_err(|e| -> agora_core::Error { e.into() })?;

  tracing::info!(
    sources = report.sources,
    statements = report.statements,
    arguments = report.arguments,
    premises = report.premises,
    topics = report.topics,
    skipped = report.skipped,
    "seed applied"
  );
  Ok(report)
}

fn write(tx: &dyn GraphTx, doc: SeedDocument) -> agora_core::Result<SeedReport> {
  let mut report = SeedReport::default();

  if !doc.topics.is_empty() && already_applied(tx, &doc)? {
    tracing::debug!(topics = doc.topics.len(), "seed topics all exist; skipping document");
    report.skipped = doc.topics.len();
    return Ok(report);
  }

  let mut statements: HashMap<String, StatementId> = HashMap::new();
  let mut arguments: HashMap<String, ArgumentId> = HashMap::new();

  for source in &doc.sources {
    tx.put_source(source)?;
    report.sources += 1;
  }

  for entry in doc.statements {
    let counter_statement = entry
      .counters
      .as_deref()
      .map(|key| lookup(&statements, "statement", key))
      .transpose()?;
    let source = attributed(tx, entry.source)?;
    let stored = tx.insert_statement(NewStatement {
      text: normalize_text(&entry.text)?,
      counter_statement,
      source,
    })?;
    if statements.insert(entry.key.clone(), stored.id).is_some() {
      return Err(duplicate("statement", &entry.key));
    }
    report.statements += 1;
  }

  for entry in doc.arguments {
    let claim = lookup(&statements, "statement", &entry.claim)?;
    let source = attributed(tx, entry.source)?;
    let argument = tx.insert_argument(NewArgument { claim, source })?;
    for key in &entry.premises {
      tx.link_premise(argument.id, lookup(&statements, "statement", key)?)?;
      report.premises += 1;
    }
    if arguments.insert(entry.key.clone(), argument.id).is_some() {
      return Err(duplicate("argument", &entry.key));
    }
    report.arguments += 1;
  }

  for entry in doc.topics {
    let argument = lookup(&arguments, "argument", &entry.argument)?;
    if tx.find_topic(&entry.name)?.is_some() {
      tracing::debug!(topic = %entry.name, "topic exists; skipping");
      report.skipped += 1;
      continue;
    }
    tx.insert_topic(&entry.name, argument)?;
    report.topics += 1;
  }

  Ok(report)
}

fn already_applied(tx: &dyn GraphTx, doc: &SeedDocument) -> agora_core::Result<bool> {
  for topic in &doc.topics {
    if tx.find_topic(&topic.name)?.is_none() {
      return Ok(false);
    }
  }
  Ok(true)
}

/// Ensure a named source row exists before something references it.
fn attributed(
  tx: &dyn GraphTx,
  name: Option<String>,
) -> agora_core::Result<Option<String>> {
  match name {
    Some(name) => Ok(Some(tx.get_or_create_source(&name)?.name)),
    None => Ok(None),
  }
}

fn lookup<Id: Copy>(
  keys: &HashMap<String, Id>,
  kind: &str,
  key: &str,
) -> agora_core::Result<Id> {
  keys
    .get(key)
    .copied()
    .ok_or_else(|| agora_core::Error::Invalid(format!("unknown {kind} key {key:?}")))
}

fn duplicate(kind: &str, key: &str) -> agora_core::Error {
  agora_core::Error::Invalid(format!("duplicate {kind} key {key:?}"))
}
