//! Scorekeepers: [`Scorekeepers`] and [`ScorekeeperAppearances`].

use rusqlite::params;
use tracing::debug;
use wwdtm_core::{
  appearance::Appearances,
  entity::EntityKind,
  scorekeeper::{Scorekeeper, ScorekeeperAppearance, ScorekeeperDetails},
  valid_id,
};

use crate::{
  Database, Result,
  accessor::{DetailsAccessor, SlugAccessor},
  encode::{RawShowAppearance, non_blank},
  utility::{self, SCOREKEEPERS, PersonRecord, SlugUtility},
};

fn into_scorekeeper(record: PersonRecord) -> Scorekeeper {
  Scorekeeper {
    id:       record.person.id,
    name:     record.person.name,
    slug:     record.person.slug,
    gender:   record.gender,
    pronouns: record.pronouns,
  }
}

// ─── Appearances ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ScorekeeperAppearances {
  db:      Database,
  utility: SlugUtility,
}

impl ScorekeeperAppearances {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Scorekeeper);
    Self { db, utility }
  }

  pub fn retrieve_appearances_by_id(&self, id: i64) -> Result<Appearances<ScorekeeperAppearance>> {
    if !valid_id(&id) {
      return Ok(Appearances::default());
    }

    let count = utility::appearance_count(&self.db, &SCOREKEEPERS, id)?;

    let mut stmt = self.db.connection().prepare_cached(
      "SELECT s.showid, s.showdate, s.bestof, s.repeatshowid,
              skm.guest, skm.description
       FROM ww_showskmap skm
       JOIN ww_shows s ON s.showid = skm.showid
       WHERE skm.scorekeeperid = ?1
       ORDER BY s.showdate ASC",
    )?;
    let rows = stmt
      .query_map(params![id], |row| {
        Ok((RawShowAppearance::from_row(row, 0)?, row.get(4)?, row.get(5)?))
      })?
      .collect::<rusqlite::Result<Vec<(RawShowAppearance, bool, Option<String>)>>>()?;

    let shows = rows
      .into_iter()
      .map(|(show, guest, description)| {
        Ok(ScorekeeperAppearance {
          show: show.into_appearance()?,
          guest,
          description: non_blank(description),
        })
      })
      .collect::<Result<Vec<_>>>()?;

    debug!(scorekeeper_id = id, shows = shows.len(), "retrieved scorekeeper appearances");
    Ok(Appearances { count, shows })
  }

  pub fn retrieve_appearances_by_slug(&self, slug: &str) -> Result<Appearances<ScorekeeperAppearance>> {
    self.utility.with_slug(slug, |id| self.retrieve_appearances_by_id(id))
  }
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Scorekeeper retrieval. Listings skip the `tbd` placeholder scorekeeper.
#[derive(Clone)]
pub struct Scorekeepers {
  db:          Database,
  utility:     SlugUtility,
  appearances: ScorekeeperAppearances,
}

impl Scorekeepers {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Scorekeeper),
      appearances: ScorekeeperAppearances::new(db.clone()),
      db,
    }
  }

  pub fn appearances(&self) -> &ScorekeeperAppearances { &self.appearances }

  pub fn retrieve_all(&self) -> Result<Vec<Scorekeeper>> {
    Ok(utility::all_people(&self.db, &SCOREKEEPERS)?.into_iter().map(into_scorekeeper).collect())
  }

  pub fn retrieve_all_details(&self) -> Result<Vec<ScorekeeperDetails>> {
    self
      .retrieve_all()?
      .into_iter()
      .map(|info| self.details(info))
      .collect()
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    utility::all_ids(&self.db, &SCOREKEEPERS, SCOREKEEPERS.order_by)
  }

  pub fn retrieve_all_slugs(&self) -> Result<Vec<String>> { utility::all_slugs(&self.db, &SCOREKEEPERS) }
}

impl SlugAccessor for Scorekeepers {
  type Info = Scorekeeper;

  fn utility(&self) -> &SlugUtility { &self.utility }

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Scorekeeper>> {
    Ok(utility::person_by_id(&self.db, &SCOREKEEPERS, id)?.map(into_scorekeeper))
  }

  fn slug_of(info: &Scorekeeper) -> &str { &info.slug }
}

impl DetailsAccessor for Scorekeepers {
  type Details = ScorekeeperDetails;

  fn details(&self, info: Scorekeeper) -> Result<ScorekeeperDetails> {
    let appearances = self.appearances.retrieve_appearances_by_id(info.id)?;
    Ok(ScorekeeperDetails { info, appearances })
  }
}
