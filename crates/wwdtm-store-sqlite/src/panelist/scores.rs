//! Integer panelist scores.
//!
//! Only regular shows with a recorded score count. The helpers here are
//! generic over the score type and shared with the decimal variant.

use chrono::NaiveDate;
use rusqlite::{params, types::FromSql};
use wwdtm_core::{
  entity::EntityKind,
  stats::{GroupedScores, ScoresList, integer_buckets},
  valid_id,
};

use crate::{Database, Result, encode::decode_date, utility::SlugUtility};

/// Numeric view of a score column, so text-stored decimals compare and group
/// by value.
pub(crate) fn score_expr(column: &str) -> String { format!("CAST(pm.{column} AS NUMERIC)") }

/// `(show date, score)` for every scored regular show, by date.
pub(super) fn dated_scores<T: FromSql>(
  db: &Database,
  id: i64,
  column: &str,
) -> Result<Vec<(NaiveDate, T)>> {
  let sql = format!(
    "SELECT s.showdate, {score}
     FROM ww_showpnlmap pm
     JOIN ww_shows s ON s.showid = pm.showid
     WHERE pm.panelistid = ?1
       AND s.bestof = 0 AND s.repeatshowid IS NULL
       AND pm.{column} IS NOT NULL
     ORDER BY s.showdate ASC",
    score = score_expr(column),
  );
  let mut stmt = db.connection().prepare_cached(&sql)?;
  let rows = stmt
    .query_map(params![id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, T>(1)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  rows
    .into_iter()
    .map(|(date, score)| Ok((decode_date(&date)?, score)))
    .collect()
}

/// `(score, times scored)` over scored regular shows, lowest score first.
pub(super) fn score_counts<T: FromSql>(db: &Database, id: i64, column: &str) -> Result<Vec<(T, u32)>> {
  let sql = format!(
    "SELECT {score} AS score, COUNT(*)
     FROM ww_showpnlmap pm
     JOIN ww_shows s ON s.showid = pm.showid
     WHERE pm.panelistid = ?1
       AND s.bestof = 0 AND s.repeatshowid IS NULL
       AND pm.{column} IS NOT NULL
     GROUP BY score
     ORDER BY score ASC",
    score = score_expr(column),
  );
  let mut stmt = db.connection().prepare_cached(&sql)?;
  let rows = stmt
    .query_map(params![id], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Lowest and highest score recorded by anyone, on any show.
pub(super) fn score_range<T: FromSql>(db: &Database, column: &str) -> Result<Option<(T, T)>> {
  let sql = format!(
    "SELECT MIN({score}), MAX({score}) FROM ww_showpnlmap pm",
    score = score_expr(column),
  );
  let (min, max): (Option<T>, Option<T>) = db
    .connection()
    .prepare_cached(&sql)?
    .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))?;
  Ok(min.zip(max))
}

const COLUMN: &str = "panelistscore";

#[derive(Clone)]
pub struct PanelistScores {
  db:      Database,
  utility: SlugUtility,
}

impl PanelistScores {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Panelist);
    Self { db, utility }
  }

  fn resolve(&self, slug: &str) -> Result<Option<i64>> { self.utility.convert_slug_to_id(slug) }

  /// Scores from regular shows, in show date order.
  pub fn retrieve_scores_by_id(&self, id: i64) -> Result<Vec<i64>> {
    Ok(self.retrieve_scores_ordered_pair_by_id(id)?.into_iter().map(|(_, s)| s).collect())
  }

  pub fn retrieve_scores_by_slug(&self, slug: &str) -> Result<Vec<i64>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_by_id(id),
      None => Ok(Vec::new()),
    }
  }

  /// Histogram over every integer between the global minimum and maximum
  /// score. Empty when the panelist has no scores.
  pub fn retrieve_scores_grouped_list_by_id(&self, id: i64) -> Result<GroupedScores<i64>> {
    if !valid_id(&id) {
      return Ok(GroupedScores::default());
    }
    let observed: Vec<(i64, u32)> = score_counts(&self.db, id, COLUMN)?;
    if observed.is_empty() {
      return Ok(GroupedScores::default());
    }
    let Some((min, max)) = score_range::<i64>(&self.db, COLUMN)? else {
      return Ok(GroupedScores::default());
    };
    Ok(GroupedScores::fill(integer_buckets(min, max), observed))
  }

  pub fn retrieve_scores_grouped_list_by_slug(&self, slug: &str) -> Result<GroupedScores<i64>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_grouped_list_by_id(id),
      None => Ok(GroupedScores::default()),
    }
  }

  pub fn retrieve_scores_grouped_ordered_pair_by_id(&self, id: i64) -> Result<Vec<(i64, u32)>> {
    Ok(self.retrieve_scores_grouped_list_by_id(id)?.ordered_pairs())
  }

  pub fn retrieve_scores_grouped_ordered_pair_by_slug(&self, slug: &str) -> Result<Vec<(i64, u32)>> {
    Ok(self.retrieve_scores_grouped_list_by_slug(slug)?.ordered_pairs())
  }

  /// Show dates and scores as parallel lists.
  pub fn retrieve_scores_list_by_id(&self, id: i64) -> Result<ScoresList<i64>> {
    Ok(self.retrieve_scores_ordered_pair_by_id(id)?.into_iter().collect())
  }

  pub fn retrieve_scores_list_by_slug(&self, slug: &str) -> Result<ScoresList<i64>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_list_by_id(id),
      None => Ok(ScoresList::default()),
    }
  }

  pub fn retrieve_scores_ordered_pair_by_id(&self, id: i64) -> Result<Vec<(NaiveDate, i64)>> {
    if !valid_id(&id) {
      return Ok(Vec::new());
    }
    dated_scores(&self.db, id, COLUMN)
  }

  pub fn retrieve_scores_ordered_pair_by_slug(&self, slug: &str) -> Result<Vec<(NaiveDate, i64)>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_ordered_pair_by_id(id),
      None => Ok(Vec::new()),
    }
  }
}
