//! Contact records and the view model exchanged over the API.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result, error::NAME_REQUIRED};

// ─── Persisted record ────────────────────────────────────────────────────────

/// A contact row as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id:            i64,
  pub first_name:    String,
  /// Stored but never exposed through [`ContactView`].
  pub middle_name:   Option<String>,
  pub last_name:     String,
  pub date_of_birth: Option<NaiveDate>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub is_active:     bool,
}

/// The validated, writable subset of a contact.
///
/// Both create and update persist exactly these columns; the id is assigned by
/// the store and the middle name is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
  pub first_name:    String,
  pub last_name:     String,
  pub date_of_birth: Option<NaiveDate>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  pub is_active:     bool,
}

// ─── View model ──────────────────────────────────────────────────────────────

/// Request and response shape for contacts.
///
/// On the way in, `id`, `fullName` and `age` are ignored. On the way out they
/// are filled from the stored row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
  pub id:            Option<i64>,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub full_name:     Option<String>,
  #[serde(default, deserialize_with = "deserialize_birth_date")]
  pub date_of_birth: Option<NaiveDate>,
  /// `None` when the contact has no date of birth.
  pub age:           Option<i32>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  #[serde(default)]
  pub is_active:     bool,
}

impl ContactView {
  /// Build the outgoing view of `contact`, computing `age` as of `today`.
  pub fn from_contact(contact: Contact, today: NaiveDate) -> Self {
    let full_name = full_name(&contact.first_name, &contact.last_name);
    let age = contact.date_of_birth.map(|dob| age_on(dob, today));
    Self {
      id: Some(contact.id),
      first_name: Some(contact.first_name),
      last_name: Some(contact.last_name),
      full_name: Some(full_name),
      date_of_birth: contact.date_of_birth,
      age,
      email: contact.email,
      phone: contact.phone,
      is_active: contact.is_active,
    }
  }

  /// Check the required names and extract the writable fields.
  pub fn into_fields(self) -> Result<ContactFields> {
    let (first_name, last_name) = match (self.first_name, self.last_name) {
      (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
        (first, last)
      }
      _ => return Err(Error::Validation(NAME_REQUIRED.to_owned())),
    };

    Ok(ContactFields {
      first_name,
      last_name,
      date_of_birth: self.date_of_birth,
      email: self.email,
      phone: self.phone,
      is_active: self.is_active,
    })
  }
}

// ─── Birth date input ────────────────────────────────────────────────────────

/// Accept `YYYY-MM-DD`, a naive date-time, or an RFC 3339 timestamp, keeping
/// only the date as written.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    .or_else(|| {
      NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
    })
}

fn deserialize_birth_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(raw) = Option::<String>::deserialize(d)? else {
    return Ok(None);
  };
  parse_birth_date(&raw)
    .map(Some)
    .ok_or_else(|| serde::de::Error::custom(format!("invalid date of birth: {raw:?}")))
}

// ─── Derived fields ──────────────────────────────────────────────────────────

pub fn full_name(first: &str, last: &str) -> String { format!("{first} {last}") }

/// Whole years between `dob` and `today`.
///
/// Takes the difference of the calendar years and subtracts one when today's
/// day-of-year is earlier than the birth day-of-year. Day-of-year shifts by one
/// after February in leap years, so births near a birthday can be off by a day.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
  let mut age = today.year() - dob.year();
  if today.ordinal() < dob.ordinal() {
    age -= 1;
  }
  age
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn ada() -> Contact {
    Contact {
      id:            7,
      first_name:    "Ada".into(),
      middle_name:   Some("King".into()),
      last_name:     "Lovelace".into(),
      date_of_birth: Some(date(2000, 6, 15)),
      email:         Some("ada@example.com".into()),
      phone:         None,
      is_active:     true,
    }
  }

  #[test]
  fn age_before_and_after_birthday() {
    assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 1)), 23);
    assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 20)), 24);
  }

  #[test]
  fn age_uses_day_of_year() {
    // 2001-03-01 is day 60; 2024-02-29 is also day 60, so no decrement.
    assert_eq!(age_on(date(2001, 3, 1), date(2024, 2, 29)), 23);
  }

  #[test]
  fn full_name_joins_with_single_space() {
    assert_eq!(full_name("Ada", "Lovelace"), "Ada Lovelace");
  }

  #[test]
  fn view_fills_derived_fields() {
    let view = ContactView::from_contact(ada(), date(2024, 6, 20));
    assert_eq!(view.id, Some(7));
    assert_eq!(view.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(view.age, Some(24));
    assert_eq!(view.email.as_deref(), Some("ada@example.com"));
    assert!(view.is_active);
  }

  #[test]
  fn view_without_birth_date_has_no_age() {
    let contact = Contact { date_of_birth: None, ..ada() };
    let view = ContactView::from_contact(contact, date(2024, 6, 20));
    assert_eq!(view.age, None);
  }

  #[test]
  fn view_hides_middle_name() {
    let json =
      serde_json::to_value(ContactView::from_contact(ada(), date(2024, 1, 1)))
        .unwrap();
    assert!(json.get("middleName").is_none());
    assert_eq!(json["fullName"], "Ada Lovelace");
    assert_eq!(json["dateOfBirth"], "2000-06-15");
    assert_eq!(json["isActive"], true);
  }

  #[test]
  fn into_fields_requires_both_names() {
    let cases = [
      (Some(""), Some("Lovelace")),
      (Some("Ada"), Some("")),
      (None, Some("Lovelace")),
      (Some("Ada"), None),
    ];
    for (first, last) in cases {
      let view = ContactView {
        first_name: first.map(str::to_owned),
        last_name: last.map(str::to_owned),
        ..Default::default()
      };
      match view.into_fields() {
        Err(Error::Validation(msg)) => assert_eq!(msg, NAME_REQUIRED),
        other => panic!("expected validation error, got {other:?}"),
      }
    }
  }

  #[test]
  fn birth_date_accepts_date_times() {
    for raw in [
      "2000-06-15",
      "2000-06-15T00:00:00",
      "2000-06-15T08:30:00.125",
      "2000-06-15T23:30:00-05:00",
    ] {
      let body = format!(r#"{{"firstName":"Ada","lastName":"L","dateOfBirth":"{raw}"}}"#);
      let view: ContactView = serde_json::from_str(&body).unwrap();
      assert_eq!(view.date_of_birth, Some(date(2000, 6, 15)), "{raw}");
    }
  }

  #[test]
  fn birth_date_null_or_missing_is_none() {
    let view: ContactView =
      serde_json::from_str(r#"{"firstName":"Ada","dateOfBirth":null}"#).unwrap();
    assert_eq!(view.date_of_birth, None);
    let view: ContactView = serde_json::from_str(r#"{"firstName":"Ada"}"#).unwrap();
    assert_eq!(view.date_of_birth, None);
  }

  #[test]
  fn birth_date_rejects_garbage() {
    let err = serde_json::from_str::<ContactView>(r#"{"dateOfBirth":"15/06/2000"}"#)
      .unwrap_err();
    assert!(err.to_string().contains("invalid date of birth"), "{err}");
  }

  #[test]
  fn into_fields_drops_client_id() {
    let body = r#"{"id":99,"firstName":"Ada","lastName":"Lovelace","isActive":true}"#;
    let view: ContactView = serde_json::from_str(body).unwrap();
    let fields = view.into_fields().unwrap();
    assert_eq!(fields.first_name, "Ada");
    assert!(fields.is_active);
    assert_eq!(fields.date_of_birth, None);
  }
}
