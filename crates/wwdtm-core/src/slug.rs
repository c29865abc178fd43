//! Slug derivation.
//!
//! A slug is stored alongside most entities, but older rows carry `NULL` or an
//! empty string. Read paths then fall back to a slug derived from the display
//! name. The stored and derived values are allowed to diverge; [`Slugged`]
//! keeps the two cases apart so callers can tell which one they got.

use crate::{Error, Result};

/// Lowercase, ASCII-transliterated, hyphen-joined form of `text`.
pub fn slugify(text: &str) -> String { ::slug::slugify(text) }

/// A row that carries a possibly-missing stored slug and a display name.
pub trait Slugged {
  /// The slug column exactly as read, `None` for SQL `NULL`.
  fn raw_slug(&self) -> Option<&str>;

  /// The name a fallback slug is derived from.
  fn display_name(&self) -> &str;

  /// The persisted slug, or `None` when the column is `NULL` or blank.
  fn stored_slug(&self) -> Option<&str> {
    self.raw_slug().map(str::trim).filter(|s| !s.is_empty())
  }

  /// The persisted slug if present, otherwise [`slugify`] of the name.
  fn effective_slug(&self) -> String {
    self
      .stored_slug()
      .map(str::to_owned)
      .unwrap_or_else(|| slugify(self.display_name()))
  }
}

// ─── Locations ───────────────────────────────────────────────────────────────

/// Fields a location slug can be built from. Empty strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationParts<'a> {
  pub id:    Option<i64>,
  pub venue: Option<&'a str>,
  pub city:  Option<&'a str>,
  pub state: Option<&'a str>,
}

fn present(field: Option<&str>) -> Option<&str> {
  field.map(str::trim).filter(|s| !s.is_empty())
}

/// Derive a location slug. The first matching rule wins:
///
/// 1. venue, city and state
/// 2. venue and city, no state
/// 3. id and venue, neither city nor state
/// 4. id, city and state, no venue
/// 5. id alone: `location-{id}`
///
/// Anything else is [`Error::InvalidLocation`].
pub fn slugify_location(parts: LocationParts<'_>) -> Result<String> {
  let id = parts.id;
  let venue = present(parts.venue);
  let city = present(parts.city);
  let state = present(parts.state);

  match (id, venue, city, state) {
    (_, Some(venue), Some(city), Some(state)) => {
      Ok(slugify(&format!("{venue} {city} {state}")))
    }
    (_, Some(venue), Some(city), None) => Ok(slugify(&format!("{venue} {city}"))),
    (Some(id), Some(venue), None, None) => Ok(slugify(&format!("{id}-{venue}"))),
    (Some(id), None, Some(city), Some(state)) => {
      Ok(slugify(&format!("{id} {city} {state}")))
    }
    (Some(id), ..) => Ok(format!("location-{id}")),
    _ => Err(Error::InvalidLocation),
  }
}
