//! Shows: the [`Shows`] accessor and the show composers.

mod info;
mod info_multiple;
mod query;
mod utility;

use std::collections::BTreeMap;

use chrono::{Datelike as _, Days, Months, NaiveDate};
use rusqlite::{OptionalExtension as _, params};
pub use info::ShowInfo;
pub use info_multiple::ShowInfoMultiple;
use query::Filter;
pub use utility::ShowUtility;
use wwdtm_core::{
  panelist::ScoreMode,
  show::{Show, ShowCounts, ShowDetails, ShowScores},
  valid_id,
};

use crate::{
  Database, Result,
  encode::{decode_date, encode_date},
};

/// Days after `today` that [`Shows::retrieve_recent`] covers by default.
pub const DEFAULT_DAYS_AHEAD: u64 = 7;
/// Days before `today` that [`Shows::retrieve_recent`] covers by default.
pub const DEFAULT_DAYS_BACK: u64 = 32;

fn year_range(year: i32) -> Option<(NaiveDate, NaiveDate)> {
  Some((NaiveDate::from_ymd_opt(year, 1, 1)?, NaiveDate::from_ymd_opt(year, 12, 31)?))
}

fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)?;
  let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
  Some((first, last))
}

/// Show retrieval.
///
/// Listings are ordered by show date. Details methods build every record from
/// the batch composer, so they cost the same handful of queries however many
/// shows match.
#[derive(Clone)]
pub struct Shows {
  db:            Database,
  utility:       ShowUtility,
  info:          ShowInfo,
  info_multiple: ShowInfoMultiple,
}

impl Shows {
  pub fn new(db: Database) -> Self {
    Self {
      utility: ShowUtility::new(db.clone()),
      info: ShowInfo::new(db.clone()),
      info_multiple: ShowInfoMultiple::new(db.clone()),
      db,
    }
  }

  pub fn utility(&self) -> &ShowUtility { &self.utility }

  pub fn info(&self) -> &ShowInfo { &self.info }

  pub fn info_multiple(&self) -> &ShowInfoMultiple { &self.info_multiple }

  // ─── Listings ─────────────────────────────────────────────────────────────

  pub fn retrieve_all(&self) -> Result<Vec<Show>> { query::shows(&self.db, Filter::All) }

  pub fn retrieve_all_details(&self, mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    self.info_multiple.details_all(mode)
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    let mut stmt = self
      .db
      .connection()
      .prepare_cached("SELECT showid FROM ww_shows ORDER BY showdate ASC")?;
    let ids = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<i64>>>()?;
    Ok(ids)
  }

  pub fn retrieve_all_dates(&self) -> Result<Vec<NaiveDate>> {
    let mut stmt = self
      .db
      .connection()
      .prepare_cached("SELECT showdate FROM ww_shows ORDER BY showdate ASC")?;
    let dates = stmt
      .query_map([], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    dates.iter().map(|d| decode_date(d)).collect()
  }

  pub fn retrieve_all_dates_tuple(&self) -> Result<Vec<(i32, u32, u32)>> {
    Ok(
      self
        .retrieve_all_dates()?
        .into_iter()
        .map(|d| (d.year(), d.month(), d.day()))
        .collect(),
    )
  }

  /// Distinct `(year, month)` pairs with at least one show.
  pub fn retrieve_all_shows_years_months_tuple(&self) -> Result<Vec<(i32, u32)>> {
    let mut months: Vec<(i32, u32)> = self
      .retrieve_all_dates()?
      .into_iter()
      .map(|d| (d.year(), d.month()))
      .collect();
    months.dedup();
    Ok(months)
  }

  /// Distinct months with at least one show, as `YYYY-MM`.
  pub fn retrieve_all_show_years_months(&self) -> Result<Vec<String>> {
    Ok(
      self
        .retrieve_all_shows_years_months_tuple()?
        .into_iter()
        .map(|(year, month)| format!("{year:04}-{month:02}"))
        .collect(),
    )
  }

  pub fn retrieve_years(&self) -> Result<Vec<i32>> {
    let mut years: Vec<i32> = self.retrieve_all_dates()?.into_iter().map(|d| d.year()).collect();
    years.dedup();
    Ok(years)
  }

  pub fn retrieve_months_by_year(&self, year: i32) -> Result<Vec<u32>> {
    let Some((from, to)) = year_range(year) else {
      return Ok(Vec::new());
    };
    let mut months: Vec<u32> = query::shows(&self.db, Filter::Dates(from, to))?
      .into_iter()
      .map(|show| show.date.month())
      .collect();
    months.dedup();
    Ok(months)
  }

  // ─── Single shows ─────────────────────────────────────────────────────────

  pub fn retrieve_by_id(&self, id: i64) -> Result<Option<Show>> {
    if !valid_id(&id) {
      return Ok(None);
    }
    Ok(query::shows(&self.db, Filter::Ids(&[id]))?.pop())
  }

  pub fn retrieve_by_date(&self, year: i32, month: u32, day: u32) -> Result<Option<Show>> {
    match self.utility.convert_date_to_id(year, month, day)? {
      Some(id) => self.retrieve_by_id(id),
      None => Ok(None),
    }
  }

  /// `date` in `YYYY-MM-DD` form. Unparseable dates answer `None`.
  pub fn retrieve_by_date_string(&self, date: &str) -> Result<Option<Show>> {
    match self.id_for_date_string(date)? {
      Some(id) => self.retrieve_by_id(id),
      None => Ok(None),
    }
  }

  pub fn retrieve_details_by_id(&self, id: i64, mode: ScoreMode) -> Result<Option<ShowDetails>> {
    Ok(self.info_multiple.details_by_ids(&[id], mode)?.pop())
  }

  pub fn retrieve_details_by_date(
    &self,
    year: i32,
    month: u32,
    day: u32,
    mode: ScoreMode,
  ) -> Result<Option<ShowDetails>> {
    match self.utility.convert_date_to_id(year, month, day)? {
      Some(id) => self.retrieve_details_by_id(id, mode),
      None => Ok(None),
    }
  }

  pub fn retrieve_details_by_date_string(
    &self,
    date: &str,
    mode: ScoreMode,
  ) -> Result<Option<ShowDetails>> {
    match self.id_for_date_string(date)? {
      Some(id) => self.retrieve_details_by_id(id, mode),
      None => Ok(None),
    }
  }

  /// Composed records for `ids`, by show date. Any invalid id empties the
  /// result.
  pub fn retrieve_details_by_ids(&self, ids: &[i64], mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    self.info_multiple.details_by_ids(ids, mode)
  }

  // ─── Ranges ───────────────────────────────────────────────────────────────

  pub fn retrieve_by_year(&self, year: i32) -> Result<Vec<Show>> {
    match year_range(year) {
      Some((from, to)) => query::shows(&self.db, Filter::Dates(from, to)),
      None => Ok(Vec::new()),
    }
  }

  pub fn retrieve_details_by_year(&self, year: i32, mode: ScoreMode) -> Result<Vec<ShowDetails>> {
    self.details_between(year_range(year), mode)
  }

  pub fn retrieve_by_year_month(&self, year: i32, month: u32) -> Result<Vec<Show>> {
    match month_range(year, month) {
      Some((from, to)) => query::shows(&self.db, Filter::Dates(from, to)),
      None => Ok(Vec::new()),
    }
  }

  pub fn retrieve_details_by_year_month(
    &self,
    year: i32,
    month: u32,
    mode: ScoreMode,
  ) -> Result<Vec<ShowDetails>> {
    self.details_between(month_range(year, month), mode)
  }

  /// Shows from `days_back` days before `today` through `days_ahead` days
  /// after it. See [`DEFAULT_DAYS_AHEAD`] and [`DEFAULT_DAYS_BACK`].
  pub fn retrieve_recent(&self, today: NaiveDate, days_ahead: u64, days_back: u64) -> Result<Vec<Show>> {
    match recent_range(today, days_ahead, days_back) {
      Some((from, to)) => query::shows(&self.db, Filter::Dates(from, to)),
      None => Ok(Vec::new()),
    }
  }

  pub fn retrieve_recent_details(
    &self,
    today: NaiveDate,
    days_ahead: u64,
    days_back: u64,
    mode: ScoreMode,
  ) -> Result<Vec<ShowDetails>> {
    self.details_between(recent_range(today, days_ahead, days_back), mode)
  }

  // ─── Aggregates ───────────────────────────────────────────────────────────

  /// Panelist scores for each regular show in `year`, lowest score first.
  pub fn retrieve_scores_by_year(&self, year: i32) -> Result<Vec<ShowScores>> {
    let Some((from, to)) = year_range(year) else {
      return Ok(Vec::new());
    };
    let mut stmt = self.db.connection().prepare_cached(
      "SELECT s.showdate, pm.panelistscore
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE s.bestof = 0 AND s.repeatshowid IS NULL
         AND pm.panelistscore IS NOT NULL
         AND s.showdate BETWEEN ?1 AND ?2
       ORDER BY s.showdate ASC, pm.panelistscore ASC",
    )?;
    let rows = stmt
      .query_map(params![encode_date(from), encode_date(to)], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut shows: Vec<ShowScores> = Vec::new();
    for (date, score) in rows {
      let date = decode_date(&date)?;
      match shows.last_mut() {
        Some(show) if show.date == date => show.scores.push(score),
        _ => shows.push(ShowScores { date, scores: vec![score] }),
      }
    }
    Ok(shows)
  }

  /// Show counts by type for `year`. All zero for a year without shows.
  pub fn retrieve_counts_by_year(&self, year: i32) -> Result<ShowCounts> {
    Ok(self.retrieve_all_counts()?.remove(&year).unwrap_or_default())
  }

  /// Show counts by type for every year with shows.
  pub fn retrieve_all_counts(&self) -> Result<BTreeMap<i32, ShowCounts>> {
    let mut stmt = self.db.connection().prepare_cached(
      "SELECT showdate, bestof, repeatshowid IS NOT NULL FROM ww_shows ORDER BY showdate ASC",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?, row.get::<_, bool>(2)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut counts: BTreeMap<i32, ShowCounts> = BTreeMap::new();
    for (date, best_of, repeat_show) in rows {
      let year = decode_date(&date)?.year();
      counts.entry(year).or_default().add(best_of, repeat_show);
    }
    Ok(counts)
  }

  // ─── Random ───────────────────────────────────────────────────────────────

  pub fn retrieve_random_id(&self) -> Result<Option<i64>> {
    Ok(
      self
        .db
        .connection()
        .prepare_cached("SELECT showid FROM ww_shows ORDER BY RANDOM() LIMIT 1")?
        .query_row([], |row| row.get(0))
        .optional()?,
    )
  }

  pub fn retrieve_random_date(&self) -> Result<Option<NaiveDate>> {
    Ok(self.retrieve_random()?.map(|show| show.date))
  }

  pub fn retrieve_random(&self) -> Result<Option<Show>> {
    match self.retrieve_random_id()? {
      Some(id) => self.retrieve_by_id(id),
      None => Ok(None),
    }
  }

  pub fn retrieve_random_details(&self, mode: ScoreMode) -> Result<Option<ShowDetails>> {
    match self.retrieve_random_id()? {
      Some(id) => self.retrieve_details_by_id(id, mode),
      None => Ok(None),
    }
  }

  // ─── Internals ────────────────────────────────────────────────────────────

  fn id_for_date_string(&self, date: &str) -> Result<Option<i64>> {
    match decode_date(date) {
      Ok(date) => self.utility.id_for_date(date),
      Err(_) => Ok(None),
    }
  }

  fn details_between(
    &self,
    range: Option<(NaiveDate, NaiveDate)>,
    mode: ScoreMode,
  ) -> Result<Vec<ShowDetails>> {
    match range {
      Some((from, to)) => self.info_multiple.details(Filter::Dates(from, to), mode),
      None => {
        self.db.score_column(mode)?;
        Ok(Vec::new())
      }
    }
  }
}

fn recent_range(today: NaiveDate, days_ahead: u64, days_back: u64) -> Option<(NaiveDate, NaiveDate)> {
  Some((
    today.checked_sub_days(Days::new(days_back))?,
    today.checked_add_days(Days::new(days_ahead))?,
  ))
}
