//! Handler for `GET /topics`.

use axum::{Json, extract::State};
use agora_core::{ArgumentationService, store::GraphStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One entry of the topic listing: `{"topic": "Television"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicEntry {
  pub topic: String,
}

/// `GET /topics`: every topic name, oldest first.
pub async fn list<S>(
  State(service): State<ArgumentationService<S>>,
) -> Result<Json<Vec<TopicEntry>>, ApiError>
where
  S: GraphStore,
{
  let topics = service
    .topics()
    .await?
    .into_iter()
    .map(|t| TopicEntry { topic: t.name })
    .collect();
  Ok(Json(topics))
}
