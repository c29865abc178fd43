//! Entity kinds and the placeholder rows each one reserves.
//!
//! Several tables carry a row that stands in for "no real entity": a show
//! without a Not My Job guest points at the `none` guest, a show whose host
//! is not yet known points at the `tbd` host, and so on. Listings and random
//! picks skip these rows.

use serde::Serialize;

/// Reserved slug marking a placeholder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
  None,
  Tbd,
  Multiple,
}

impl Placeholder {
  pub const fn slug(self) -> &'static str {
    match self {
      Placeholder::None => "none",
      Placeholder::Tbd => "tbd",
      Placeholder::Multiple => "multiple",
    }
  }
}

/// The slug-addressable entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Guest,
  Host,
  Location,
  Panelist,
  Scorekeeper,
}

impl EntityKind {
  /// The placeholder row excluded from listings and random picks.
  pub const fn placeholder(self) -> Placeholder {
    match self {
      EntityKind::Guest => Placeholder::None,
      EntityKind::Host | EntityKind::Location | EntityKind::Scorekeeper => {
        Placeholder::Tbd
      }
      EntityKind::Panelist => Placeholder::Multiple,
    }
  }
}

/// Id, name and effective slug of a person referenced from another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
  pub id:   i64,
  pub name: String,
  pub slug: String,
}
