//! Arguments and their premise links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ArgumentId, StatementId};

/// An argument names exactly one statement as its claim.
///
/// Nothing prevents two arguments from sharing a claim. Wherever a single
/// owner is needed the one with the lowest id is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
  pub id:          ArgumentId,
  pub claim:       StatementId,
  pub source:      Option<String>,
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::GraphStore::create_argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArgument {
  pub claim:  StatementId,
  pub source: Option<String>,
}

/// "Statement `premise` justifies argument `argument`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premise {
  pub argument: ArgumentId,
  pub premise:  StatementId,
}
