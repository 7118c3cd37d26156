//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text. Permissions are stored as the level
//! name (its `AsRef<str>` form) and decoded leniently (see [`Permission::from_stored`]).

use chrono::NaiveDate;
use roster_core::{Permission, contact::Contact, user::User};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str = "contact_id, first_name, middle_name, last_name,
  date_of_birth, email, phone, is_active";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id:    i64,
  pub first_name:    String,
  pub middle_name:   Option<String>,
  pub last_name:     String,
  pub date_of_birth: Option<String>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub is_active:     bool,
}

impl RawContact {
  /// Read a row selected with [`CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:    row.get(0)?,
      first_name:    row.get(1)?,
      middle_name:   row.get(2)?,
      last_name:     row.get(3)?,
      date_of_birth: row.get(4)?,
      email:         row.get(5)?,
      phone:         row.get(6)?,
      is_active:     row.get(7)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:            self.contact_id,
      first_name:    self.first_name,
      middle_name:   self.middle_name,
      last_name:     self.last_name,
      date_of_birth: self.date_of_birth.as_deref().map(decode_date).transpose()?,
      email:         self.email,
      phone:         self.phone,
      is_active:     self.is_active,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:     i64,
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub permissions: Option<String>,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:          self.user_id,
      first_name:  self.first_name,
      last_name:   self.last_name,
      email:       self.email,
      phone:       self.phone,
      is_active:   self.is_active,
      permissions: Permission::from_stored(self.permissions.as_deref())?,
    })
  }
}
