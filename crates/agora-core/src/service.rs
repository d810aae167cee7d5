//! [`ArgumentationService`] — rebuttal creation and tree-fragment lookups.
//!
//! The graph is stored flat; every lookup here resolves exactly one hop
//! (topic → root claim, argument → premises, claim → rebuttals,
//! claim → owning argument). Nothing is cached between calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
  ArgumentId, Error, Result, StatementId,
  argument::NewArgument,
  source,
  statement::{self, NewStatement, StatementView},
  store::GraphStore,
  topic::Topic,
};

// ─── Request / result types ──────────────────────────────────────────────────

/// Input to [`ArgumentationService::create_rebuttal`].
///
/// Both required fields are optional here so that their absence is reported
/// as a validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuttalRequest {
  pub target_claim_id: Option<StatementId>,
  pub text:            Option<String>,
  pub source:          Option<String>,
}

/// A rebuttal statement paired with the argument that owns it.
///
/// `argument_id` is always set for rebuttals created through
/// [`ArgumentationService::create_rebuttal`]; listings leave it empty for
/// statements that have no owning argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rebuttal {
  pub argument_id:  Option<ArgumentId>,
  pub statement_id: StatementId,
  pub text:         String,
  pub source:       Option<String>,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Orchestrates the stores. Stateless apart from the shared store handle.
pub struct ArgumentationService<S> {
  store: Arc<S>,
}

impl<S> Clone for ArgumentationService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

fn lift<E: Into<Error>>(e: E) -> Error { e.into() }

impl<S: GraphStore> ArgumentationService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Record `request.text` as a rebuttal of `request.target_claim_id`.
  ///
  /// The source upsert, statement insert, and argument insert commit together
  /// or not at all.
  pub async fn create_rebuttal(&self, request: RebuttalRequest) -> Result<Rebuttal> {
    let target = request
      .target_claim_id
      .ok_or_else(|| Error::Invalid("targetClaimId is required".into()))?;
    let text = request
      .text
      .as_deref()
      .ok_or_else(|| Error::Invalid("text is required".into()))
      .and_then(statement::normalize_text)?;
    let source_name = source::effective_name(request.source.as_deref());

    let rebuttal = self
      .store
      .atomically(move |tx| {
        if tx.get_statement(target)?.is_none() {
          return Err(Error::StatementNotFound(target));
        }

        let source = tx.get_or_create_source(&source_name)?;

        let statement = tx.insert_statement(NewStatement {
          text,
          counter_statement: Some(target),
          source: Some(source.name.clone()),
        })?;

        let argument = tx.insert_argument(NewArgument {
          claim:  statement.id,
          source: Some(source.name.clone()),
        })?;

        Ok(Rebuttal {
          argument_id:  Some(argument.id),
          statement_id: statement.id,
          text:         statement.text,
          source:       Some(source.name),
        })
      })
      .await
      .map_err(lift)?;

    tracing::info!(
      target_claim = %target,
      statement = %rebuttal.statement_id,
      argument = ?rebuttal.argument_id,
      source = ?rebuttal.source,
      "rebuttal recorded"
    );

    Ok(rebuttal)
  }

  /// Every statement rebutting `target`, each with its first owning argument.
  ///
  /// An unknown target simply has no rebuttals.
  pub async fn rebuttals_for(&self, target: StatementId) -> Result<Vec<Rebuttal>> {
    let statements = self.store.rebuttals_of(target).await.map_err(lift)?;
    tracing::debug!(target_claim = %target, count = statements.len(), "listing rebuttals");

    let mut rebuttals = Vec::with_capacity(statements.len());
    for statement in statements {
      let argument_id = self
        .store
        .arguments_by_claim(statement.id)
        .await
        .map_err(lift)?
        .into_iter()
        .next()
        .map(|a| a.id);

      rebuttals.push(Rebuttal {
        argument_id,
        statement_id: statement.id,
        text: statement.text,
        source: statement.source,
      });
    }
    Ok(rebuttals)
  }

  /// The claim of the argument the topic called `name` points at.
  pub async fn root_claim(&self, name: &str) -> Result<StatementView> {
    let topic = self
      .store
      .find_topic(name)
      .await
      .map_err(lift)?
      .ok_or_else(|| Error::TopicNotFound(name.to_owned()))?;

    let argument = self
      .store
      .get_argument(topic.argument)
      .await
      .map_err(lift)?
      .ok_or(Error::ArgumentNotFound(topic.argument))?;

    let claim = self
      .store
      .get_statement(argument.claim)
      .await
      .map_err(lift)?
      .ok_or(Error::StatementNotFound(argument.claim))?;

    Ok(claim.into())
  }

  /// The premises supporting `argument`. An argument without premises yields
  /// an empty list.
  pub async fn justifications(&self, argument: ArgumentId) -> Result<Vec<StatementView>> {
    if self.store.get_argument(argument).await.map_err(lift)?.is_none() {
      return Err(Error::ArgumentNotFound(argument));
    }

    let premises = self.store.premises_of(argument).await.map_err(lift)?;
    tracing::debug!(%argument, count = premises.len(), "listing justifications");
    Ok(premises.into_iter().map(StatementView::from).collect())
  }

  /// The id of the argument that owns `claim`; lowest id if several do.
  pub async fn argument_id_by_claim(&self, claim: StatementId) -> Result<ArgumentId> {
    self
      .store
      .first_argument_by_claim(claim)
      .await
      .map_err(lift)?
      .map(|a| a.id)
      .ok_or(Error::UnclaimedStatement(claim))
  }

  pub async fn topics(&self) -> Result<Vec<Topic>> {
    self.store.list_topics().await.map_err(lift)
  }
}
