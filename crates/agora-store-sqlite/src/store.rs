//! [`SqliteStore`] — the SQLite implementation of [`GraphStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;

use agora_core::{
  ArgumentId, StatementId,
  argument::{Argument, NewArgument, Premise},
  source::Source,
  statement::{NewStatement, Statement},
  store::{GraphStore, GraphTx},
  topic::Topic,
};

use crate::{
  Result,
  encode::{decode_arguments, decode_statements, encode_dt},
  queries,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Agora graph store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema initialised");
    Ok(())
  }
}

// ─── Transactional view ──────────────────────────────────────────────────────

/// [`GraphTx`] over an open transaction. Lives only for the duration of one
/// `atomically` call on the connection thread.
struct SqliteTx<'c>(&'c Connection);

fn fault(e: impl Into<crate::Error>) -> agora_core::Error {
  let e: crate::Error = e.into();
  e.into()
}

impl GraphTx for SqliteTx<'_> {
  fn get_statement(&self, id: StatementId) -> agora_core::Result<Option<Statement>> {
    queries::get_statement(self.0, id.get())
      .map_err(fault)?
      .map(|raw| raw.into_statement().map_err(fault))
      .transpose()
  }

  fn get_or_create_source(&self, name: &str) -> agora_core::Result<Source> {
    queries::get_or_create_source(self.0, name).map_err(fault)
  }

  fn put_source(&self, source: &Source) -> agora_core::Result<Source> {
    queries::put_source(self.0, source).map_err(fault)
  }

  fn insert_statement(&self, input: NewStatement) -> agora_core::Result<Statement> {
    insert_statement(self.0, input).map_err(fault)
  }

  fn insert_argument(&self, input: NewArgument) -> agora_core::Result<Argument> {
    insert_argument(self.0, input).map_err(fault)
  }

  fn link_premise(
    &self,
    argument: ArgumentId,
    premise: StatementId,
  ) -> agora_core::Result<Premise> {
    queries::link_premise(self.0, argument.get(), premise.get()).map_err(fault)?;
    Ok(Premise { argument, premise })
  }

  fn find_topic(&self, name: &str) -> agora_core::Result<Option<Topic>> {
    queries::find_topic(self.0, name).map_err(fault)
  }

  fn insert_topic(&self, name: &str, argument: ArgumentId) -> agora_core::Result<Topic> {
    let id = queries::insert_topic(self.0, name, argument.get()).map_err(fault)?;
    Ok(Topic { id: id.into(), name: name.to_owned(), argument })
  }
}

/// Insert a statement stamped with the current time.
fn insert_statement(conn: &Connection, input: NewStatement) -> rusqlite::Result<Statement> {
  let recorded_at = Utc::now();
  let id = queries::insert_statement(
    conn,
    &input.text,
    input.counter_statement.map(StatementId::get),
    input.source.as_deref(),
    &encode_dt(recorded_at),
  )?;
  Ok(Statement {
    id: StatementId(id),
    text: input.text,
    counter_statement: input.counter_statement,
    source: input.source,
    recorded_at,
  })
}

/// Insert an argument stamped with the current time.
fn insert_argument(conn: &Connection, input: NewArgument) -> rusqlite::Result<Argument> {
  let recorded_at = Utc::now();
  let id = queries::insert_argument(
    conn,
    input.claim.get(),
    input.source.as_deref(),
    &encode_dt(recorded_at),
  )?;
  Ok(Argument {
    id: ArgumentId(id),
    claim: input.claim,
    source: input.source,
    recorded_at,
  })
}

// ─── GraphStore impl ─────────────────────────────────────────────────────────

impl GraphStore for SqliteStore {
  type Error = crate::Error;

  // ── Transactions ──────────────────────────────────────────────────────────

  async fn atomically<T, F>(&self, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&dyn GraphTx) -> agora_core::Result<T> + Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = work(&SqliteTx(&tx));
        // Dropping an uncommitted transaction rolls it back, but do it
        // explicitly so a failed rollback surfaces as a database error.
        match outcome {
          Ok(_) => tx.commit()?,
          Err(_) => tx.rollback()?,
        }
        Ok(outcome)
      })
      .await?;

    if let Err(e) = &outcome {
      tracing::debug!(error = %e, "unit of work rolled back");
    }
    Ok(outcome?)
  }

  // ── Sources ───────────────────────────────────────────────────────────────

  async fn get_source(&self, name: &str) -> Result<Option<Source>> {
    let name = name.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| Ok(queries::get_source(conn, &name)?))
        .await?,
    )
  }

  async fn get_or_create_source(&self, name: &str) -> Result<Source> {
    let name = name.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| Ok(queries::get_or_create_source(conn, &name)?))
        .await?,
    )
  }

  // ── Statements ────────────────────────────────────────────────────────────

  async fn get_statement(&self, id: StatementId) -> Result<Option<Statement>> {
    let raw = self
      .conn
      .call(move |conn| Ok(queries::get_statement(conn, id.get())?))
      .await?;
    raw.map(|r| r.into_statement()).transpose()
  }

  async fn create_statement(&self, input: NewStatement) -> Result<Statement> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(insert_statement(conn, input)?))
        .await?,
    )
  }

  async fn rebuttals_of(&self, target: StatementId) -> Result<Vec<Statement>> {
    let raws = self
      .conn
      .call(move |conn| Ok(queries::rebuttals_of(conn, target.get())?))
      .await?;
    decode_statements(raws)
  }

  // ── Arguments ─────────────────────────────────────────────────────────────

  async fn get_argument(&self, id: ArgumentId) -> Result<Option<Argument>> {
    let raw = self
      .conn
      .call(move |conn| Ok(queries::get_argument(conn, id.get())?))
      .await?;
    raw.map(|r| r.into_argument()).transpose()
  }

  async fn create_argument(&self, input: NewArgument) -> Result<Argument> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(insert_argument(conn, input)?))
        .await?,
    )
  }

  async fn arguments_by_claim(&self, claim: StatementId) -> Result<Vec<Argument>> {
    let raws = self
      .conn
      .call(move |conn| Ok(queries::arguments_by_claim(conn, claim.get())?))
      .await?;
    decode_arguments(raws)
  }

  async fn first_argument_by_claim(&self, claim: StatementId) -> Result<Option<Argument>> {
    let raw = self
      .conn
      .call(move |conn| Ok(queries::first_argument_by_claim(conn, claim.get())?))
      .await?;
    raw.map(|r| r.into_argument()).transpose()
  }

  // ── Premises ──────────────────────────────────────────────────────────────

  async fn premises_of(&self, argument: ArgumentId) -> Result<Vec<Statement>> {
    let raws = self
      .conn
      .call(move |conn| Ok(queries::premises_of(conn, argument.get())?))
      .await?;
    decode_statements(raws)
  }

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn find_topic(&self, name: &str) -> Result<Option<Topic>> {
    let name = name.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| Ok(queries::find_topic(conn, &name)?))
        .await?,
    )
  }

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    Ok(self.conn.call(|conn| Ok(queries::list_topics(conn)?)).await?)
  }
}
