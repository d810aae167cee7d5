//! JSON REST API for Agora.
//!
//! Exposes an axum [`Router`] backed by an [`ArgumentationService`] over any
//! [`agora_core::store::GraphStore`]. CORS, tracing, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", agora_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod rebuttals;
pub mod structured;
pub mod topics;

use axum::{Router, routing::get};
use agora_core::{ArgumentationService, store::GraphStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: ArgumentationService<S>) -> Router<()>
where
  S: GraphStore + 'static,
{
  Router::new()
    // Topics
    .route("/topics", get(topics::list::<S>))
    // Rebuttals
    .route("/rebuttals", get(rebuttals::list::<S>).post(rebuttals::create::<S>))
    // Structured arguments
    .route(
      "/structured-arguments/by-topic-name",
      get(structured::by_topic_name::<S>),
    )
    .route(
      "/structured-arguments/justifications",
      get(structured::justifications::<S>),
    )
    .route(
      "/structured-arguments/argument-by-claim",
      get(structured::argument_by_claim::<S>),
    )
    .route(
      "/structured-arguments/argument-id-by-claim",
      get(structured::argument_by_claim::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
