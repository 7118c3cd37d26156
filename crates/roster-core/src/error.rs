//! Error types for `roster-core`.

use thiserror::Error;

/// The message returned when a contact is submitted without both names.
pub const NAME_REQUIRED: &str =
  "First and last name must not be null or an empty string";

#[derive(Debug, Error)]
pub enum Error {
  /// The caller's permission is below what the operation requires.
  #[error("unauthorized")]
  Unauthorized,

  #[error("{0}")]
  Validation(String),

  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  /// A user row carries a permission string that names no known level.
  #[error("invalid permission stored for user: {0:?}")]
  InvalidPermissionStored(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error, lifting a core error found in its source chain.
  ///
  /// Backends decode stored permissions with [`crate::Permission::from_stored`]
  /// and carry the resulting [`Error`] as a source, so a bad permission string
  /// keeps its specific kind after crossing the store boundary.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    let stored = std::iter::successors(
      Some(&*boxed as &(dyn std::error::Error + 'static)),
      |e| e.source(),
    )
    .find_map(|e| match e.downcast_ref::<Error>() {
      Some(Error::InvalidPermissionStored(raw)) => Some(raw.clone()),
      _ => None,
    });

    match stored {
      Some(raw) => Error::InvalidPermissionStored(raw),
      None => Error::Store(boxed),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
