//! The `GraphStore` trait and its transactional view, `GraphTx`.
//!
//! The traits are implemented by storage backends (e.g. `agora-store-sqlite`).
//! Higher layers (`agora-api`, `agora-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  ArgumentId, StatementId,
  argument::{Argument, NewArgument, Premise},
  source::Source,
  statement::{NewStatement, Statement},
  topic::Topic,
};

// ─── Unit of work ────────────────────────────────────────────────────────────

/// Synchronous operations available inside [`GraphStore::atomically`].
///
/// Every call runs against the same open transaction. Errors are reported in
/// the core taxonomy so a closure can abort with a domain error (e.g.
/// [`Error::StatementNotFound`](crate::Error::StatementNotFound)) and have it
/// reach the caller unchanged after the rollback.
pub trait GraphTx {
  fn get_statement(&self, id: StatementId) -> crate::Result<Option<Statement>>;

  /// Return the source called `name`, inserting a bare one if absent.
  fn get_or_create_source(&self, name: &str) -> crate::Result<Source>;

  /// Insert `source` unless one with the same name exists; either way return
  /// the stored row.
  fn put_source(&self, source: &Source) -> crate::Result<Source>;

  fn insert_statement(&self, input: NewStatement) -> crate::Result<Statement>;

  fn insert_argument(&self, input: NewArgument) -> crate::Result<Argument>;

  /// Link a premise to an argument. Linking an existing pair is a no-op.
  fn link_premise(
    &self,
    argument: ArgumentId,
    premise: StatementId,
  ) -> crate::Result<Premise>;

  fn find_topic(&self, name: &str) -> crate::Result<Option<Topic>>;

  fn insert_topic(&self, name: &str, argument: ArgumentId)
  -> crate::Result<Topic>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Agora graph backend.
///
/// Each method is a single read or write. The only multi-step write path is
/// [`GraphStore::atomically`], whose boundary is owned by the caller.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GraphStore: Send + Sync {
  /// Backend error. Converting into [`crate::Error`] must preserve domain
  /// errors raised inside [`GraphStore::atomically`].
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Transactions ──────────────────────────────────────────────────────

  /// Run `work` inside one transaction. `Ok` commits; `Err` rolls back every
  /// write `work` made and is returned to the caller.
  fn atomically<T, F>(
    &self,
    work: F,
  ) -> impl Future<Output = Result<T, Self::Error>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn GraphTx) -> crate::Result<T> + Send + 'static;

  // ── Sources ───────────────────────────────────────────────────────────

  fn get_source<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Source>, Self::Error>> + Send + 'a;

  /// Return the source called `name`, inserting a bare one if absent. The
  /// insert is a single conditional statement, so concurrent callers racing
  /// on the same name still end up with one row.
  fn get_or_create_source<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Source, Self::Error>> + Send + 'a;

  // ── Statements ────────────────────────────────────────────────────────

  fn get_statement(
    &self,
    id: StatementId,
  ) -> impl Future<Output = Result<Option<Statement>, Self::Error>> + Send + '_;

  /// Persist a statement and return it with its generated id.
  fn create_statement(
    &self,
    input: NewStatement,
  ) -> impl Future<Output = Result<Statement, Self::Error>> + Send + '_;

  /// Every statement whose `counter_statement` is `target`, ascending by id.
  fn rebuttals_of(
    &self,
    target: StatementId,
  ) -> impl Future<Output = Result<Vec<Statement>, Self::Error>> + Send + '_;

  // ── Arguments ─────────────────────────────────────────────────────────

  fn get_argument(
    &self,
    id: ArgumentId,
  ) -> impl Future<Output = Result<Option<Argument>, Self::Error>> + Send + '_;

  fn create_argument(
    &self,
    input: NewArgument,
  ) -> impl Future<Output = Result<Argument, Self::Error>> + Send + '_;

  /// Every argument whose claim is `claim`, ascending by id.
  fn arguments_by_claim(
    &self,
    claim: StatementId,
  ) -> impl Future<Output = Result<Vec<Argument>, Self::Error>> + Send + '_;

  /// The argument with the lowest id whose claim is `claim`.
  fn first_argument_by_claim(
    &self,
    claim: StatementId,
  ) -> impl Future<Output = Result<Option<Argument>, Self::Error>> + Send + '_;

  // ── Premises ──────────────────────────────────────────────────────────

  /// The statements linked as premises of `argument`. No order is promised.
  fn premises_of(
    &self,
    argument: ArgumentId,
  ) -> impl Future<Output = Result<Vec<Statement>, Self::Error>> + Send + '_;

  // ── Topics ────────────────────────────────────────────────────────────

  fn find_topic<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + 'a;

  /// All topics, ascending by id.
  fn list_topics(
    &self,
  ) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;
}
