use wwdtm_core::{
  panelist::ScoreMode,
  show::{ShowBluff, ShowCoreInfo, ShowGuest, ShowPanelist},
  valid_id,
};

use super::query::{self, Filter};
use crate::{Database, Result};

/// The parts of one show's composed record, fetched separately.
///
/// Invalid or unknown ids answer `None` or an empty list.
#[derive(Clone)]
pub struct ShowInfo {
  db: Database,
}

impl ShowInfo {
  pub fn new(db: Database) -> Self { Self { db } }

  /// Show row with location, host, scorekeeper, description and notes.
  pub fn retrieve_core_info_by_id(&self, id: i64) -> Result<Option<ShowCoreInfo>> {
    if !valid_id(&id) {
      return Ok(None);
    }
    Ok(query::core_info(&self.db, Filter::Ids(&[id]))?.pop())
  }

  /// Panelists ordered by score, highest first.
  pub fn retrieve_panelist_info_by_id(
    &self,
    id: i64,
    mode: ScoreMode,
  ) -> Result<Vec<ShowPanelist>> {
    if !valid_id(&id) {
      self.db.score_column(mode)?;
      return Ok(Vec::new());
    }
    Ok(
      query::panelists(&self.db, Filter::Ids(&[id]), mode)?
        .remove(&id)
        .unwrap_or_default(),
    )
  }

  pub fn retrieve_bluff_info_by_id(&self, id: i64) -> Result<Vec<ShowBluff>> {
    if !valid_id(&id) {
      return Ok(Vec::new());
    }
    Ok(query::bluffs(&self.db, Filter::Ids(&[id]))?.remove(&id).unwrap_or_default())
  }

  pub fn retrieve_guest_info_by_id(&self, id: i64) -> Result<Vec<ShowGuest>> {
    if !valid_id(&id) {
      return Ok(Vec::new());
    }
    Ok(query::guests(&self.db, Filter::Ids(&[id]))?.remove(&id).unwrap_or_default())
  }
}
