//! Error types for `agora-core`.

use thiserror::Error;

use crate::{ArgumentId, StatementId};

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing, blank, or out of bounds. Always raised
  /// before any write is attempted.
  #[error("invalid input: {0}")]
  Invalid(String),

  #[error("statement not found: {0}")]
  StatementNotFound(StatementId),

  #[error("argument not found: {0}")]
  ArgumentNotFound(ArgumentId),

  #[error("no argument has statement {0} as its claim")]
  UnclaimedStatement(StatementId),

  #[error("topic not found: {0:?}")]
  TopicNotFound(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure.
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
