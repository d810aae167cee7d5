//! Handlers for `/structured-arguments` endpoints: one-hop views of the
//! argument tree.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/structured-arguments/by-topic-name` | `?name`; the topic's root claim |
//! | `GET`  | `/structured-arguments/justifications` | `?argumentId`; the argument's premises |
//! | `GET`  | `/structured-arguments/argument-by-claim` | `?claimId`; owning argument id as a bare number |
//! | `GET`  | `/structured-arguments/argument-id-by-claim` | Alias of the above |

use axum::{Json, extract::State};
use agora_core::{
  ArgumentId, ArgumentationService, StatementId, statement::StatementView,
  store::GraphStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::Query};

// ─── Root claim ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TopicParams {
  pub name: String,
}

/// `GET /structured-arguments/by-topic-name?name=<topic>`
pub async fn by_topic_name<S>(
  State(service): State<ArgumentationService<S>>,
  Query(params): Query<TopicParams>,
) -> Result<Json<StatementView>, ApiError>
where
  S: GraphStore,
{
  Ok(Json(service.root_claim(&params.name).await?))
}

// ─── Justifications ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentParams {
  pub argument_id: ArgumentId,
}

/// `GET /structured-arguments/justifications?argumentId=<id>`
pub async fn justifications<S>(
  State(service): State<ArgumentationService<S>>,
  Query(params): Query<ArgumentParams>,
) -> Result<Json<Vec<StatementView>>, ApiError>
where
  S: GraphStore,
{
  Ok(Json(service.justifications(params.argument_id).await?))
}

// ─── Claim → argument ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimParams {
  pub claim_id: StatementId,
}

/// `GET /structured-arguments/argument-by-claim?claimId=<id>`
///
/// The body is the bare id, e.g. `1`.
pub async fn argument_by_claim<S>(
  State(service): State<ArgumentationService<S>>,
  Query(params): Query<ClaimParams>,
) -> Result<Json<ArgumentId>, ApiError>
where
  S: GraphStore,
{
  Ok(Json(service.argument_id_by_claim(params.claim_id).await?))
}
