//! Caller identity supplied by the host's session layer.
//!
//! The session is opaque to this crate: an upstream layer (reverse proxy or
//! session middleware) places the current user's id in a request header, and
//! [`Caller`] hands it to the service untouched.

use std::convert::Infallible;

use axum::{
  extract::FromRequestParts,
  http::{HeaderName, request::Parts},
};
use roster_core::store::ContactStore;

use crate::AppState;

/// Header carrying the session user id when none is configured.
pub const DEFAULT_SESSION_HEADER: &str = "x-session-user-id";

/// Where to find the session user id on incoming requests.
#[derive(Debug, Clone)]
pub struct SessionConfig {
  pub header: HeaderName,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self { header: HeaderName::from_static(DEFAULT_SESSION_HEADER) }
  }
}

/// The raw session user id, if the request carried one.
///
/// Never rejects: a missing or non-UTF-8 header yields `Caller(None)`, which
/// the service resolves to no permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<String>);

impl Caller {
  pub fn as_deref(&self) -> Option<&str> { self.0.as_deref() }
}

impl<S> FromRequestParts<AppState<S>> for Caller
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let id = parts
      .headers
      .get(&state.session.header)
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned);
    Ok(Caller(id))
  }
}
