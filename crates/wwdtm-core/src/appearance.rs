//! Appearance aggregates shared by every entity kind.

use chrono::NaiveDate;
use serde::Serialize;

/// Appearance counts. Regular shows are neither Best Of nor repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppearanceCount {
  pub regular_shows: u32,
  pub all_shows:     u32,
}

/// The show-level fields every appearance row carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowAppearance {
  pub show_id:     i64,
  pub date:        NaiveDate,
  pub best_of:     bool,
  pub repeat_show: bool,
}

/// Counts plus the appearance rows, ordered by show date ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearances<S, C = AppearanceCount> {
  pub count: C,
  pub shows: Vec<S>,
}

impl<S, C: Default> Default for Appearances<S, C> {
  fn default() -> Self { Self { count: C::default(), shows: Vec::new() } }
}

impl<S, C> Appearances<S, C> {
  pub fn is_empty(&self) -> bool { self.shows.is_empty() }
}

/// Location recordings share the appearance shape with no extra payload.
pub type Recordings = Appearances<ShowAppearance>;
