//! Pronoun reference records.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pronoun {
  pub id:       i64,
  pub pronouns: String,
}
