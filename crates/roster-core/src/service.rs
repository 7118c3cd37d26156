//! [`ContactService`] — the permission-gated CRUD operations on contacts.
//!
//! Every operation follows the same steps: resolve the caller's permission,
//! authorize, validate the input (writes only), then touch the store once.
//! The caller is passed explicitly as the raw session value; nothing is read
//! from ambient state.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
  Error, Permission, Result,
  contact::ContactView,
  store::ContactStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
  Read,
  Write,
}

fn local_today() -> NaiveDate { Local::now().date_naive() }

/// Contact operations over any [`ContactStore`].
pub struct ContactService<S> {
  store: Arc<S>,
  today: fn() -> NaiveDate,
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, today: local_today }
  }

  /// Replace the clock used to compute ages.
  pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Permission ────────────────────────────────────────────────────────

  /// Resolve the permission of the caller identified by `caller`.
  ///
  /// A missing or non-integer caller id, an unknown user, and a user with an
  /// empty permission column all resolve to [`Permission::None`].
  pub async fn resolve_permission(&self, caller: Option<&str>) -> Result<Permission> {
    let Some(user_id) = caller.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
      return Ok(Permission::None);
    };

    let user = self
      .store
      .get_user(user_id)
      .await
      .map_err(Error::from_store)?;

    Ok(user.map_or(Permission::None, |u| u.permissions))
  }

  async fn authorize(&self, caller: Option<&str>, access: Access) -> Result<Permission> {
    let permission = self.resolve_permission(caller).await?;
    let allowed = match access {
      Access::Read => permission.can_read(),
      Access::Write => permission.can_write(),
    };
    if !allowed {
      warn!(?caller, %permission, ?access, "request denied");
      return Err(Error::Unauthorized);
    }
    Ok(permission)
  }

  /// Fail with [`Error::Unauthorized`] unless `caller` may read contacts.
  ///
  /// The HTTP layer calls this before surfacing malformed input, so callers
  /// without access learn nothing beyond the denial.
  pub async fn authorize_read(&self, caller: Option<&str>) -> Result<Permission> {
    self.authorize(caller, Access::Read).await
  }

  /// Fail with [`Error::Unauthorized`] unless `caller` may write contacts.
  pub async fn authorize_write(&self, caller: Option<&str>) -> Result<Permission> {
    self.authorize(caller, Access::Write).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All active contacts as views.
  pub async fn list_active(&self, caller: Option<&str>) -> Result<Vec<ContactView>> {
    self.authorize(caller, Access::Read).await?;

    let contacts = self
      .store
      .list_active_contacts()
      .await
      .map_err(Error::from_store)?;
    debug!(count = contacts.len(), "listed active contacts");

    let today = (self.today)();
    Ok(
      contacts
        .into_iter()
        .map(|c| ContactView::from_contact(c, today))
        .collect(),
    )
  }

  pub async fn get_by_id(&self, caller: Option<&str>, id: i64) -> Result<ContactView> {
    self.authorize(caller, Access::Read).await?;

    let contact = self
      .store
      .get_contact(id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::ContactNotFound(id))?;

    Ok(ContactView::from_contact(contact, (self.today)()))
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a new contact from `view`. Returns the number of rows written.
  pub async fn create(&self, caller: Option<&str>, view: ContactView) -> Result<usize> {
    self.authorize(caller, Access::Write).await?;
    let fields = view.into_fields()?;

    let inserted = self
      .store
      .insert_contact(fields)
      .await
      .map_err(Error::from_store)?;
    info!(id = inserted.id, rows = inserted.rows, "created contact");

    Ok(inserted.rows)
  }

  /// Overwrite contact `id` from `view`. Returns the number of rows written,
  /// which is `0` when nothing changed.
  pub async fn update(
    &self,
    caller: Option<&str>,
    id: i64,
    view: ContactView,
  ) -> Result<usize> {
    self.authorize(caller, Access::Write).await?;
    let fields = view.into_fields()?;

    self.require_contact(id).await?;
    let rows = self
      .store
      .update_contact(id, fields)
      .await
      .map_err(Error::from_store)?;
    info!(id, rows, "updated contact");

    Ok(rows)
  }

  pub async fn delete(&self, caller: Option<&str>, id: i64) -> Result<usize> {
    self.authorize(caller, Access::Write).await?;

    self.require_contact(id).await?;
    let rows = self
      .store
      .delete_contact(id)
      .await
      .map_err(Error::from_store)?;
    info!(id, rows, "deleted contact");

    Ok(rows)
  }

  async fn require_contact(&self, id: i64) -> Result<()> {
    self
      .store
      .get_contact(id)
      .await
      .map_err(Error::from_store)?
      .map(|_| ())
      .ok_or(Error::ContactNotFound(id))
  }
}
