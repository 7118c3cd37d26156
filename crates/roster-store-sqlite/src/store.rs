//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  contact::{Contact, ContactFields},
  store::{ContactStore, Inserted},
  user::{NewUser, User},
};

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, RawContact, RawUser, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each store
/// method borrows the connection for one `call` closure and gives it back when
/// the closure returns.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Set the middle name of contact `id`. The API never writes this column.
  pub async fn set_middle_name(&self, id: i64, middle_name: Option<String>) -> Result<usize> {
    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET middle_name = ?2 WHERE contact_id = ?1",
          rusqlite::params![id, middle_name],
        )?)
      })
      .await?;
    Ok(rows)
  }

  /// Write a raw permission string for `user_id`, bypassing the typed API.
  #[cfg(test)]
  pub(crate) async fn set_raw_permission(&self, user_id: i64, raw: Option<&str>) -> Result<()> {
    let raw = raw.map(str::to_owned);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET permissions = ?2 WHERE user_id = ?1",
          rusqlite::params![user_id, raw],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the permission column for `user_id` exactly as stored.
  #[cfg(test)]
  pub(crate) async fn raw_permission(&self, user_id: i64) -> Result<Option<String>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT permissions FROM users WHERE user_id = ?1",
          rusqlite::params![user_id],
          |row| row.get::<_, Option<String>>(0),
        )?)
      })
      .await?;
    Ok(raw)
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn list_active_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts WHERE is_active = 1"
        ))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
            rusqlite::params![id],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert_contact(&self, fields: ContactFields) -> Result<Inserted> {
    let dob_str = fields.date_of_birth.map(encode_date);

    let inserted = self
      .conn
      .call(move |conn| {
        let rows = conn.execute(
          "INSERT INTO contacts (
             first_name, last_name, date_of_birth, email, phone, is_active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            fields.first_name,
            fields.last_name,
            dob_str,
            fields.email,
            fields.phone,
            fields.is_active,
          ],
        )?;
        Ok(Inserted { id: conn.last_insert_rowid(), rows })
      })
      .await?;

    Ok(inserted)
  }

  async fn update_contact(&self, id: i64, fields: ContactFields) -> Result<usize> {
    let dob_str = fields.date_of_birth.map(encode_date);

    // The NOT (...) guard leaves unchanged rows alone so the count only
    // reflects real modifications.
    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts
              SET first_name = ?2, last_name = ?3, date_of_birth = ?4,
                  email = ?5, phone = ?6, is_active = ?7
            WHERE contact_id = ?1
              AND NOT (first_name IS ?2 AND last_name IS ?3
                       AND date_of_birth IS ?4 AND email IS ?5
                       AND phone IS ?6 AND is_active IS ?7)",
          rusqlite::params![
            id,
            fields.first_name,
            fields.last_name,
            dob_str,
            fields.email,
            fields.phone,
            fields.is_active,
          ],
        )?)
      })
      .await?;

    Ok(rows)
  }

  async fn delete_contact(&self, id: i64) -> Result<usize> {
    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(rows)
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, user: NewUser) -> Result<User> {
    let perm_str  = user.permissions.as_ref().to_owned();
    let is_active = user.is_active;
    let (first_name, last_name, email, phone) = (
      user.first_name.clone(),
      user.last_name.clone(),
      user.email.clone(),
      user.phone.clone(),
    );

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (first_name, last_name, email, phone, is_active, permissions)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![first_name, last_name, email, phone, is_active, perm_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id,
      first_name:  user.first_name,
      last_name:   user.last_name,
      email:       user.email,
      phone:       user.phone,
      is_active:   user.is_active,
      permissions: user.permissions,
    })
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, first_name, last_name, email, phone, is_active, permissions
               FROM users WHERE user_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawUser {
                user_id:     row.get(0)?,
                first_name:  row.get(1)?,
                last_name:   row.get(2)?,
                email:       row.get(3)?,
                phone:       row.get(4)?,
                is_active:   row.get(5)?,
                permissions: row.get(6)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
