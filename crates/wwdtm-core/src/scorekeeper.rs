//! Scorekeepers.

use serde::Serialize;

use crate::appearance::{Appearances, ShowAppearance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorekeeper {
  pub id:       i64,
  pub name:     String,
  pub slug:     String,
  pub gender:   Option<String>,
  pub pronouns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorekeeperAppearance {
  #[serde(flatten)]
  pub show:        ShowAppearance,
  pub guest:       bool,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorekeeperDetails {
  #[serde(flatten)]
  pub info:        Scorekeeper,
  pub appearances: Appearances<ScorekeeperAppearance>,
}
