use std::collections::BTreeMap;

use rusqlite::{OptionalExtension as _, params};
use tracing::debug;
use wwdtm_core::{
  appearance::Appearances,
  entity::EntityKind,
  panelist::{
    AppearanceSummary, Milestone, Milestones, PanelistAppearance, PanelistAppearanceCount,
    ScoreMode,
  },
  rank::Rank,
  valid_id,
};

use super::scores::score_expr;
use crate::{
  Database, Result,
  encode::{RawShowAppearance, decode_date, read_score},
  utility::{self, PANELISTS, SlugUtility},
};

#[derive(Clone)]
pub struct PanelistAppearances {
  db:      Database,
  utility: SlugUtility,
}

impl PanelistAppearances {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Panelist);
    Self { db, utility }
  }

  /// Every appearance, ordered by show date, with scores read per `mode`.
  pub fn retrieve_appearances_by_id(&self, id: i64, mode: ScoreMode) -> Result<AppearanceSummary> {
    let column = self.db.score_column(mode)?;
    if !valid_id(&id) {
      return Ok(AppearanceSummary::default());
    }

    let base = utility::appearance_count(&self.db, &PANELISTS, id)?;
    let count = PanelistAppearanceCount {
      regular_shows:     base.regular_shows,
      all_shows:         base.all_shows,
      shows_with_scores: self.shows_with_scores(id, column)?,
    };

    let sql = format!(
      "SELECT s.showid, s.showdate, s.bestof, s.repeatshowid,
              pm.panelistlrndstart, pm.panelistlrndcorrect, {score}, pm.showpnlrank
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE pm.panelistid = ?1
       ORDER BY s.showdate ASC",
      score = score_expr(column),
    );
    let mut stmt = self.db.connection().prepare_cached(&sql)?;
    let rows = stmt
      .query_map(params![id], |row| {
        Ok((
          RawShowAppearance::from_row(row, 0)?,
          row.get::<_, Option<i64>>(4)?,
          row.get::<_, Option<i64>>(5)?,
          read_score(row, 6, mode)?,
          row.get::<_, Option<String>>(7)?,
        ))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let shows = rows
      .into_iter()
      .map(|(show, start, correct, score, rank)| {
        Ok(PanelistAppearance {
          show: show.into_appearance()?,
          lightning_round_start: start,
          lightning_round_correct: correct,
          score,
          rank: Rank::from_column(rank.as_deref()),
        })
      })
      .collect::<Result<Vec<_>>>()?;

    let milestones = self.milestones(id)?;
    debug!(panelist_id = id, shows = shows.len(), "retrieved panelist appearances");
    Ok(AppearanceSummary { milestones, appearances: Appearances { count, shows } })
  }

  pub fn retrieve_appearances_by_slug(
    &self,
    slug: &str,
    mode: ScoreMode,
  ) -> Result<AppearanceSummary> {
    match self.utility.convert_slug_to_id(slug)? {
      Some(id) => self.retrieve_appearances_by_id(id, mode),
      None => {
        self.db.score_column(mode)?;
        Ok(AppearanceSummary::default())
      }
    }
  }

  /// Regular-show appearance counts for every year in the show table, with
  /// zero for years the panelist missed. Empty when the panelist has never
  /// appeared on a regular show.
  pub fn retrieve_yearly_appearances_by_id(&self, id: i64) -> Result<BTreeMap<i32, u32>> {
    if !valid_id(&id) {
      return Ok(BTreeMap::new());
    }
    let conn = self.db.connection();

    let mut stmt = conn.prepare_cached(
      "SELECT CAST(strftime('%Y', s.showdate) AS INTEGER) AS year, COUNT(pm.showid)
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE pm.panelistid = ?1
         AND s.bestof = 0 AND s.repeatshowid IS NULL
       GROUP BY year",
    )?;
    let observed = stmt
      .query_map(params![id], |row| Ok((row.get::<_, i32>(0)?, row.get::<_, u32>(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    if observed.is_empty() {
      return Ok(BTreeMap::new());
    }

    let mut stmt = conn.prepare_cached(
      "SELECT DISTINCT CAST(strftime('%Y', showdate) AS INTEGER) FROM ww_shows",
    )?;
    let mut years = stmt
      .query_map([], |row| Ok((row.get::<_, i32>(0)?, 0)))?
      .collect::<rusqlite::Result<BTreeMap<i32, u32>>>()?;
    years.extend(observed);
    Ok(years)
  }

  pub fn retrieve_yearly_appearances_by_slug(&self, slug: &str) -> Result<BTreeMap<i32, u32>> {
    self.utility.with_slug(slug, |id| self.retrieve_yearly_appearances_by_id(id))
  }

  fn shows_with_scores(&self, id: i64, column: &str) -> Result<u32> {
    let sql = format!(
      "SELECT COUNT(pm.showid)
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE pm.panelistid = ?1
         AND s.bestof = 0 AND s.repeatshowid IS NULL
         AND pm.{column} IS NOT NULL"
    );
    Ok(
      self
        .db
        .connection()
        .prepare_cached(&sql)?
        .query_row(params![id], |row| row.get(0))?,
    )
  }

  fn milestone(&self, id: i64, direction: &str) -> Result<Option<Milestone>> {
    let sql = format!(
      "SELECT s.showid, s.showdate
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE pm.panelistid = ?1
         AND s.bestof = 0 AND s.repeatshowid IS NULL
       ORDER BY s.showdate {direction}
       LIMIT 1"
    );
    let row: Option<(i64, String)> = self
      .db
      .connection()
      .prepare_cached(&sql)?
      .query_row(params![id], |row| Ok((row.get(0)?, row.get(1)?)))
      .optional()?;
    row
      .map(|(show_id, date)| Ok(Milestone { show_id, show_date: decode_date(&date)? }))
      .transpose()
  }

  fn milestones(&self, id: i64) -> Result<Option<Milestones>> {
    let Some(first) = self.milestone(id, "ASC")? else {
      return Ok(None);
    };
    let Some(most_recent) = self.milestone(id, "DESC")? else {
      return Ok(None);
    };
    Ok(Some(Milestones { first, most_recent }))
  }
}
