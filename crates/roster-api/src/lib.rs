//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] over a [`ContactService`] backed by any
//! [`ContactStore`]. TLS, session issuance and transport concerns are the
//! caller's responsibility; the session user id arrives in a header (see
//! [`session`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(state))
//! ```

pub mod contacts;
pub mod error;
pub mod session;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{ContactService, store::ContactStore};

pub use error::ApiError;
pub use session::{Caller, SessionConfig};

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  pub service: Arc<ContactService<S>>,
  pub session: Arc<SessionConfig>,
}

impl<S: ContactStore> AppState<S> {
  pub fn new(service: ContactService<S>, session: SessionConfig) -> Self {
    Self { service: Arc::new(service), session: Arc::new(session) }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/contacts", post(contacts::create::<S>))
    .route("/contacts/active", get(contacts::list_active::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
