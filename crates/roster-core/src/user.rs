//! Users — consulted only to resolve a caller's [`Permission`].

use crate::Permission;

/// A user row. Profile fields are carried but play no part in authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id:          i64,
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub permissions: Permission,
}

/// Input for [`ContactStore::add_user`](crate::store::ContactStore::add_user).
#[derive(Debug, Clone, Default)]
pub struct NewUser {
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub permissions: Permission,
}
