//! Topic — a named entry point into the graph.

use serde::{Deserialize, Serialize};

use crate::{ArgumentId, TopicId};

/// Maps a human label (e.g. "Television") to one root argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id:       TopicId,
  pub name:     String,
  pub argument: ArgumentId,
}
