//! Pronoun reference table.

use std::collections::BTreeMap;

use rusqlite::{OptionalExtension as _, params};
use wwdtm_core::{pronoun::Pronoun, valid_id};

use crate::{Database, Result};

#[derive(Clone)]
pub struct Pronouns {
  db: Database,
}

impl Pronouns {
  pub fn new(db: Database) -> Self { Self { db } }

  /// Every pronoun set, ordered by id.
  pub fn retrieve_all(&self) -> Result<Vec<Pronoun>> {
    let mut stmt = self
      .db
      .connection()
      .prepare_cached("SELECT pronounsid, pronouns FROM ww_pronouns ORDER BY pronounsid ASC")?;
    let rows = stmt
      .query_map([], |row| Ok(Pronoun { id: row.get(0)?, pronouns: row.get(1)? }))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    Ok(self.retrieve_all()?.into_iter().map(|p| p.id).collect())
  }

  pub fn retrieve_all_as_map(&self) -> Result<BTreeMap<i64, String>> {
    Ok(self.retrieve_all()?.into_iter().map(|p| (p.id, p.pronouns)).collect())
  }

  pub fn retrieve_all_pronouns(&self) -> Result<Vec<String>> {
    Ok(self.retrieve_all()?.into_iter().map(|p| p.pronouns).collect())
  }

  pub fn retrieve_by_id(&self, id: i64) -> Result<Option<Pronoun>> {
    if !valid_id(&id) {
      return Ok(None);
    }
    Ok(
      self
        .db
        .connection()
        .prepare_cached("SELECT pronounsid, pronouns FROM ww_pronouns WHERE pronounsid = ?1")?
        .query_row(params![id], |row| Ok(Pronoun { id: row.get(0)?, pronouns: row.get(1)? }))
        .optional()?,
    )
  }
}
