use std::collections::BTreeMap;

use tracing::debug;
use wwdtm_core::{
  panelist::ScoreMode,
  show::{ShowBluff, ShowCoreInfo, ShowDetails, ShowGuest, ShowPanelist},
  valid_id,
};

use super::query::{self, Filter};
use crate::{Database, Result};

/// Batch counterpart of [`super::ShowInfo`], keyed by show id.
///
/// One query per part regardless of batch size. A batch containing any
/// invalid id answers an empty map.
#[derive(Clone)]
pub struct ShowInfoMultiple {
  db: Database,
}

/// `None` when the batch must short-circuit to empty.
fn checked(ids: &[i64]) -> Option<Filter<'_>> {
  if ids.is_empty() || !ids.iter().all(|id| valid_id(id)) {
    debug!(ids = ids.len(), "rejecting show id batch");
    return None;
  }
  Some(Filter::Ids(ids))
}

impl ShowInfoMultiple {
  pub fn new(db: Database) -> Self { Self { db } }

  pub fn retrieve_core_info_all(&self) -> Result<BTreeMap<i64, ShowCoreInfo>> {
    self.core_info(Filter::All)
  }

  pub fn retrieve_core_info_by_ids(&self, ids: &[i64]) -> Result<BTreeMap<i64, ShowCoreInfo>> {
    match checked(ids) {
      Some(filter) => self.core_info(filter),
      None => Ok(BTreeMap::new()),
    }
  }

  pub fn retrieve_panelist_info_all(
    &self,
    mode: ScoreMode,
  ) -> Result<BTreeMap<i64, Vec<ShowPanelist>>> {
    query::panelists(&self.db, Filter::All, mode)
  }

  pub fn retrieve_panelist_info_by_ids(
    &self,
    ids: &[i64],
    mode: ScoreMode,
  ) -> Result<BTreeMap<i64, Vec<ShowPanelist>>> {
    match checked(ids) {
      Some(filter) => query::panelists(&self.db, filter, mode),
      None => {
        self.db.score_column(mode)?;
        Ok(BTreeMap::new())
      }
    }
  }

  pub fn retrieve_bluff_info_all(&self) -> Result<BTreeMap<i64, Vec<ShowBluff>>> {
    query::bluffs(&self.db, Filter::All)
  }

  pub fn retrieve_bluff_info_by_ids(&self, ids: &[i64]) -> Result<BTreeMap<i64, Vec<ShowBluff>>> {
    match checked(ids) {
      Some(filter) => query::bluffs(&self.db, filter),
      None => Ok(BTreeMap::new()),
    }
  }

  pub fn retrieve_guest_info_all(&self) -> Result<BTreeMap<i64, Vec<ShowGuest>>> {
    query::guests(&self.db, Filter::All)
  }

  pub fn retrieve_guest_info_by_ids(&self, ids: &[i64]) -> Result<BTreeMap<i64, Vec<ShowGuest>>> {
    match checked(ids) {
      Some(filter) => query::guests(&self.db, filter),
      None => Ok(BTreeMap::new()),
    }
  }

  /// Fully composed records for `ids`, by show date.
  pub(crate) fn details_by_ids(&self, ids: &[i64], mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    match checked(ids) {
      Some(filter) => self.details(filter, mode),
      None => {
        self.db.score_column(mode)?;
        Ok(Vec::new())
      }
    }
  }

  /// Fully composed records for every show, by show date.
  pub(crate) fn details_all(&self, mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    self.details(Filter::All, mode)
  }

  fn core_info(&self, filter: Filter<'_>) -> Result<BTreeMap<i64, ShowCoreInfo>> {
    Ok(
      query::core_info(&self.db, filter)?
        .into_iter()
        .map(|info| (info.show.id, info))
        .collect(),
    )
  }

  pub(super) fn details(&self, filter: Filter<'_>, mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    let mut panelists = query::panelists(&self.db, filter, mode)?;
    let mut bluffs = query::bluffs(&self.db, filter)?;
    let mut guests = query::guests(&self.db, filter)?;

    let details: Vec<ShowDetails> = query::core_info(&self.db, filter)?
      .into_iter()
      .map(|info| {
        let id = info.show.id;
        ShowDetails {
          info,
          panelists: panelists.remove(&id).unwrap_or_default(),
          bluffs: bluffs.remove(&id).unwrap_or_default(),
          guests: guests.remove(&id).unwrap_or_default(),
        }
      })
      .collect();

    debug!(shows = details.len(), "composed show details");
    Ok(details)
  }
}
