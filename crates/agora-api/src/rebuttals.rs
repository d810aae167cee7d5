//! Handlers for `/rebuttals` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/rebuttals` | `?targetClaimId` required |
//! | `POST` | `/rebuttals` | Body: [`RebuttalBody`]; returns 201 + the created rebuttal |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use agora_core::{
  ArgumentationService, StatementId,
  service::{Rebuttal, RebuttalRequest},
  store::GraphStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, Query},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub target_claim_id: StatementId,
}

/// `GET /rebuttals?targetClaimId=<id>`
pub async fn list<S>(
  State(service): State<ArgumentationService<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Rebuttal>>, ApiError>
where
  S: GraphStore,
{
  Ok(Json(service.rebuttals_for(params.target_claim_id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /rebuttals`.
///
/// Required fields are optional here so a missing one is reported by the
/// service as a 400 with a useful message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuttalBody {
  pub target_claim_id: Option<StatementId>,
  pub text:            Option<String>,
  pub source:          Option<String>,
}

impl From<RebuttalBody> for RebuttalRequest {
  fn from(b: RebuttalBody) -> Self {
    RebuttalRequest {
      target_claim_id: b.target_claim_id,
      text:            b.text,
      source:          b.source,
    }
  }
}

/// `POST /rebuttals`. Returns 201 + the created [`Rebuttal`].
pub async fn create<S>(
  State(service): State<ArgumentationService<S>>,
  JsonBody(body): JsonBody<RebuttalBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GraphStore,
{
  let rebuttal = service.create_rebuttal(body.into()).await?;
  Ok((StatusCode::CREATED, Json(rebuttal)))
}
