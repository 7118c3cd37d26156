//! Caller permission levels.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, FromRepr};

use crate::{Error, Result};

/// Access level attached to a user.
///
/// The levels have a numeric order, but authorization never compares them:
/// reads are refused only to [`Permission::None`], writes only to `None` and
/// [`Permission::ReadOnly`].
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  FromRepr,
)]
#[repr(u8)]
pub enum Permission {
  #[default]
  None      = 0,
  ReadOnly  = 1,
  ReadWrite = 2,
  Admin     = 3,
}

impl Permission {
  pub fn can_read(self) -> bool { self != Permission::None }

  pub fn can_write(self) -> bool {
    !matches!(self, Permission::None | Permission::ReadOnly)
  }

  /// Decode a stored permission column.
  ///
  /// `NULL` and the empty string mean [`Permission::None`]. Otherwise the value
  /// must be a level name (`"ReadWrite"`) or its numeric value (`"2"`).
  pub fn from_stored(raw: Option<&str>) -> Result<Self> {
    let raw = match raw {
      Some(s) if !s.is_empty() => s,
      _ => return Ok(Permission::None),
    };

    let trimmed = raw.trim();
    trimmed
      .parse::<Permission>()
      .ok()
      .or_else(|| trimmed.parse::<u8>().ok().and_then(Permission::from_repr))
      .ok_or_else(|| Error::InvalidPermissionStored(raw.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_or_missing_is_none() {
    assert_eq!(Permission::from_stored(None).unwrap(), Permission::None);
    assert_eq!(Permission::from_stored(Some("")).unwrap(), Permission::None);
  }

  #[test]
  fn parses_names_and_numbers() {
    assert_eq!(
      Permission::from_stored(Some("ReadWrite")).unwrap(),
      Permission::ReadWrite
    );
    assert_eq!(Permission::from_stored(Some(" Admin ")).unwrap(), Permission::Admin);
    assert_eq!(Permission::from_stored(Some("1")).unwrap(), Permission::ReadOnly);
  }

  #[test]
  fn unknown_value_is_rejected() {
    for raw in ["readwrite", "Root", "7", " "] {
      assert!(
        matches!(
          Permission::from_stored(Some(raw)),
          Err(Error::InvalidPermissionStored(ref s)) if s == raw
        ),
        "{raw:?} should be rejected"
      );
    }
  }

  #[test]
  fn gates() {
    assert!(!Permission::None.can_read());
    assert!(Permission::ReadOnly.can_read());
    assert!(!Permission::ReadOnly.can_write());
    assert!(Permission::ReadWrite.can_write());
    assert!(Permission::Admin.can_write());
  }

  #[test]
  fn stored_form_is_the_name() {
    assert_eq!(Permission::ReadWrite.as_ref(), "ReadWrite");
    assert_eq!(Permission::Admin.to_string(), "Admin");
  }
}
