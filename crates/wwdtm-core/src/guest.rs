//! Not My Job guests.

use serde::Serialize;

use crate::appearance::{Appearances, ShowAppearance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
  pub id:   i64,
  pub name: String,
  pub slug: String,
}

/// One Not My Job appearance. `score_exception` marks shows where the usual
/// scoring rules did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestAppearance {
  #[serde(flatten)]
  pub show:            ShowAppearance,
  pub score:           Option<i64>,
  pub score_exception: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestDetails {
  #[serde(flatten)]
  pub info:        Guest,
  pub appearances: Appearances<GuestAppearance>,
}
