//! Sources — attributed origins of statements and arguments.
//!
//! A source's identity is its name; there is no surrogate key.

use serde::{Deserialize, Serialize};

/// Name recorded when a rebuttal is submitted without attribution.
pub const DEFAULT_SOURCE: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  pub name: String,
  /// Free-text description, e.g. "A news report published in 2023."
  pub text: Option<String>,
  pub url:  Option<String>,
}

impl Source {
  /// A bare source as created by get-or-create: name only.
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), text: None, url: None }
  }
}

/// The source name a rebuttal is attributed to: the caller's choice when it
/// is non-blank, otherwise [`DEFAULT_SOURCE`].
pub fn effective_name(requested: Option<&str>) -> String {
  requested
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .unwrap_or(DEFAULT_SOURCE)
    .to_owned()
}
