use chrono::NaiveDate;
use rusqlite::{OptionalExtension as _, params};
use tracing::trace;
use wwdtm_core::valid_id;

use crate::{
  Database, Result,
  encode::{decode_date, encode_date},
};

/// Show id and date lookups.
///
/// Impossible calendar dates answer `None` or `false` without a query.
#[derive(Clone)]
pub struct ShowUtility {
  db: Database,
}

impl ShowUtility {
  pub fn new(db: Database) -> Self { Self { db } }

  pub fn convert_date_to_id(&self, year: i32, month: u32, day: u32) -> Result<Option<i64>> {
    match NaiveDate::from_ymd_opt(year, month, day) {
      Some(date) => self.id_for_date(date),
      None => {
        trace!(year, month, day, "impossible show date");
        Ok(None)
      }
    }
  }

  pub fn convert_id_to_date(&self, id: i64) -> Result<Option<NaiveDate>> {
    if !valid_id(&id) {
      return Ok(None);
    }
    let date: Option<String> = self
      .db
      .connection()
      .prepare_cached("SELECT showdate FROM ww_shows WHERE showid = ?1 LIMIT 1")?
      .query_row(params![id], |row| row.get(0))
      .optional()?;
    date.as_deref().map(decode_date).transpose()
  }

  pub fn date_exists(&self, year: i32, month: u32, day: u32) -> Result<bool> {
    Ok(self.convert_date_to_id(year, month, day)?.is_some())
  }

  pub fn id_exists(&self, id: i64) -> Result<bool> {
    if !valid_id(&id) {
      return Ok(false);
    }
    Ok(
      self
        .db
        .connection()
        .prepare_cached("SELECT EXISTS (SELECT 1 FROM ww_shows WHERE showid = ?1)")?
        .query_row(params![id], |row| row.get(0))?,
    )
  }

  /// Memoized on the shared [`Database`] handle, misses included.
  pub(crate) fn id_for_date(&self, date: NaiveDate) -> Result<Option<i64>> {
    self.db.lookups().date_to_show.get_or_try_insert(date, || {
      Ok(
        self
          .db
          .connection()
          .prepare_cached("SELECT showid FROM ww_shows WHERE showdate = ?1 LIMIT 1")?
          .query_row(params![encode_date(date)], |row| row.get(0))
          .optional()?,
      )
    })
  }
}
