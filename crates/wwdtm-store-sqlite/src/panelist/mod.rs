//! Panelists: the [`Panelists`] accessor and its scoring components.

mod appearances;
mod decimal_scores;
mod scores;
mod statistics;

pub use appearances::PanelistAppearances;
pub use decimal_scores::PanelistDecimalScores;
pub(crate) use scores::score_expr;
pub use scores::PanelistScores;
pub use statistics::PanelistStatistics;
use wwdtm_core::{
  entity::EntityKind,
  panelist::{Panelist, PanelistDetails, ScoreMode},
};

use crate::{
  Database, Result,
  accessor::SlugAccessor,
  utility::{self, PANELISTS, PersonRecord, SlugUtility},
};

fn into_panelist(record: PersonRecord) -> Panelist {
  Panelist {
    id:       record.person.id,
    name:     record.person.name,
    slug:     record.person.slug,
    gender:   record.gender,
    pronouns: record.pronouns,
  }
}

/// Panelist retrieval. Listings skip the `multiple` placeholder panelist.
#[derive(Clone)]
pub struct Panelists {
  db:          Database,
  utility:     SlugUtility,
  appearances: PanelistAppearances,
  statistics:  PanelistStatistics,
}

impl Panelists {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Panelist),
      appearances: PanelistAppearances::new(db.clone()),
      statistics: PanelistStatistics::new(db.clone()),
      db,
    }
  }

  pub fn appearances(&self) -> &PanelistAppearances { &self.appearances }

  pub fn statistics(&self) -> &PanelistStatistics { &self.statistics }

  pub fn retrieve_all(&self) -> Result<Vec<Panelist>> {
    Ok(
      utility::all_people(&self.db, &PANELISTS)?
        .into_iter()
        .map(into_panelist)
        .collect(),
    )
  }

  pub fn retrieve_all_details(&self, mode: ScoreMode) -> Result<Vec<PanelistDetails>> {
    self
      .retrieve_all()?
      .into_iter()
      .map(|info| self.details(info, mode))
      .collect()
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    utility::all_ids(&self.db, &PANELISTS, PANELISTS.order_by)
  }

  pub fn retrieve_all_slugs(&self) -> Result<Vec<String>> {
    utility::all_slugs(&self.db, &PANELISTS)
  }

  /// Panelist with statistics, bluff counts and appearances. Scores are read
  /// per `mode`.
  pub fn retrieve_details_by_id(&self, id: i64, mode: ScoreMode) -> Result<Option<PanelistDetails>> {
    self
      .retrieve_by_id(id)?
      .map(|info| self.details(info, mode))
      .transpose()
  }

  pub fn retrieve_details_by_slug(
    &self,
    slug: &str,
    mode: ScoreMode,
  ) -> Result<Option<PanelistDetails>> {
    self.utility.with_slug(slug, |id| self.retrieve_details_by_id(id, mode))
  }

  pub fn retrieve_random_details(&self, mode: ScoreMode) -> Result<Option<PanelistDetails>> {
    match self.retrieve_random_id()? {
      Some(id) => self.retrieve_details_by_id(id, mode),
      None => Ok(None),
    }
  }

  fn details(&self, info: Panelist, mode: ScoreMode) -> Result<PanelistDetails> {
    let statistics = self.statistics.retrieve_statistics_by_id(info.id, mode)?;
    let bluffs = self.statistics.retrieve_bluffs_by_id(info.id)?;
    let appearances = self.appearances.retrieve_appearances_by_id(info.id, mode)?;
    Ok(PanelistDetails { info, statistics, bluffs, appearances })
  }
}

impl SlugAccessor for Panelists {
  type Info = Panelist;

  fn utility(&self) -> &SlugUtility { &self.utility }

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Panelist>> {
    Ok(utility::person_by_id(&self.db, &PANELISTS, id)?.map(into_panelist))
  }

  fn slug_of(info: &Panelist) -> &str { &info.slug }
}
