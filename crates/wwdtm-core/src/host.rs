//! Show hosts.

use serde::Serialize;

use crate::appearance::{Appearances, ShowAppearance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Host {
  pub id:       i64,
  pub name:     String,
  pub slug:     String,
  pub gender:   Option<String>,
  /// In the order they were assigned, not alphabetical.
  pub pronouns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostAppearance {
  #[serde(flatten)]
  pub show:  ShowAppearance,
  /// Guest host for this show.
  pub guest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostDetails {
  #[serde(flatten)]
  pub info:        Host,
  pub appearances: Appearances<HostAppearance>,
}
