//! Surrogate identifiers.
//!
//! Every generated key is a plain SQL integer on disk. The newtypes keep a
//! statement id from being passed where an argument id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! surrogate_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

surrogate_id!(
  /// Key of a row in `statements`.
  StatementId
);

surrogate_id!(
  /// Key of a row in `arguments`.
  ArgumentId
);

surrogate_id!(
  /// Key of a row in `topics`.
  TopicId
);
