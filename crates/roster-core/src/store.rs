//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The service
//! and HTTP layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactFields},
  user::{NewUser, User},
};

/// Outcome of inserting a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
  /// The id assigned by the store.
  pub id:   i64,
  /// Rows written by the statement.
  pub rows: usize,
}

/// Abstraction over a Roster store backend.
///
/// Each method performs a single statement against the backend and releases
/// the connection before returning. Write methods report the number of rows
/// they changed.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// All contacts with `is_active` set, in backend order.
  fn list_active_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  fn insert_contact(
    &self,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Inserted, Self::Error>> + Send + '_;

  /// Overwrite the writable columns of contact `id`.
  ///
  /// Returns `0` when the row is missing or already holds exactly `fields`.
  fn update_contact(
    &self,
    id: i64,
    fields: ContactFields,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn delete_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. The permission is typed, so only known levels are
  /// ever written.
  fn add_user(
    &self,
    user: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  ///
  /// A stored permission that does not decode is an error whose source chain
  /// contains [`crate::Error::InvalidPermissionStored`].
  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
