use chrono::{Datelike, NaiveDate};

use crate::prelude::*;

pub fn now() -> DateTime {
  Utc::now().naive_utc()
}

/// Years that keep the stored text form fixed-width, so the database orders
/// timestamps the same way `DateTime` does.
pub fn is_storable(date: DateTime) -> bool {
  (0..=9999).contains(&date.year())
}

/// Accepts ISO-8601 date-times with either `T` or a space as separator, an
/// optional fractional part and an optional UTC offset, or a bare date
/// (midnight). Anything outside years 0000-9999 is rejected.
pub fn parse_datetime(text: &str) -> Option<DateTime> {
  let text = text.trim();

  if let Ok(date) = chrono::DateTime::parse_from_rfc3339(text) {
    return Some(date.naive_utc()).filter(|date| is_storable(*date));
  }

  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
    .filter(|date| is_storable(*date))
}
