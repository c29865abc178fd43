//! Decoding helpers between SQLite column values and domain types.
//!
//! Dates are stored as `YYYY-MM-DD` text. Decimal columns may hold text,
//! integers or reals depending on how the row was written.

use std::str::FromStr as _;

use chrono::NaiveDate;
use rusqlite::{
  Row,
  types::{FromSql, FromSqlError, FromSqlResult, ValueRef},
};
use rust_decimal::Decimal;
use wwdtm_core::{
  entity::PersonRef,
  panelist::{Score, ScoreMode},
  slug::Slugged,
};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_date(date: NaiveDate) -> String { date.format("%Y-%m-%d").to_string() }

// ─── Decimals ────────────────────────────────────────────────────────────────

/// A decimal read from any numeric or text column, normalized.
pub struct SqlDecimal(pub Decimal);

impl FromSql for SqlDecimal {
  fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
    let decimal = match value {
      ValueRef::Integer(i) => Decimal::from(i),
      ValueRef::Real(f) => Decimal::try_from(f).map_err(|e| FromSqlError::Other(Box::new(e)))?,
      ValueRef::Text(bytes) => {
        let text = std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Decimal::from_str(text.trim()).map_err(|e| FromSqlError::Other(Box::new(e)))?
      }
      _ => return Err(FromSqlError::InvalidType),
    };
    Ok(SqlDecimal(decimal.normalize()))
  }
}

pub fn decimal(value: Option<SqlDecimal>) -> Option<Decimal> { value.map(|d| d.0) }

/// Read a score column in the representation `mode` asks for.
pub fn read_score(row: &Row<'_>, idx: usize, mode: ScoreMode) -> rusqlite::Result<Option<Score>> {
  Ok(match mode {
    ScoreMode::Integer => row.get::<_, Option<i64>>(idx)?.map(Score::Integer),
    ScoreMode::Decimal => row.get::<_, Option<SqlDecimal>>(idx)?.map(|d| Score::Decimal(d.0)),
  })
}

// ─── Text ────────────────────────────────────────────────────────────────────

/// Trimmed text, with blank values collapsed to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// `?1, ?2, ..., ?n` for binding an `IN (...)` list one value at a time.
pub fn placeholders(n: usize) -> String {
  (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A named entity row as read, before the slug fallback is applied.
pub struct RawNamed {
  pub id:   i64,
  pub name: String,
  pub slug: Option<String>,
}

impl Slugged for RawNamed {
  fn raw_slug(&self) -> Option<&str> { self.slug.as_deref() }

  fn display_name(&self) -> &str { &self.name }
}

impl RawNamed {
  /// Read `id`, `name`, `slug` from three consecutive columns.
  pub fn from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:   row.get(start)?,
      name: row.get(start + 1)?,
      slug: row.get(start + 2)?,
    })
  }

  pub fn into_person(self) -> PersonRef {
    let slug = self.effective_slug();
    PersonRef { id: self.id, name: self.name, slug }
  }
}

/// Like [`RawNamed`], but every column may be `NULL` because the row came
/// from a `LEFT JOIN`.
pub struct RawOptionalNamed {
  pub id:   Option<i64>,
  pub name: Option<String>,
  pub slug: Option<String>,
}

impl RawOptionalNamed {
  pub fn from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:   row.get(start)?,
      name: row.get(start + 1)?,
      slug: row.get(start + 2)?,
    })
  }

  /// `None` unless both the reference and the referenced row exist.
  pub fn into_person(self) -> Option<PersonRef> {
    let (id, name) = (self.id?, self.name?);
    Some(RawNamed { id, name, slug: self.slug }.into_person())
  }
}

/// Raw columns of a show appearance row.
pub struct RawShowAppearance {
  pub show_id:        i64,
  pub date:           String,
  pub best_of:        bool,
  pub repeat_show_id: Option<i64>,
}

impl RawShowAppearance {
  /// Read `showid`, `showdate`, `bestof`, `repeatshowid` from four
  /// consecutive columns.
  pub fn from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      show_id:        row.get(start)?,
      date:           row.get(start + 1)?,
      best_of:        row.get(start + 2)?,
      repeat_show_id: row.get(start + 3)?,
    })
  }

  pub fn into_appearance(self) -> Result<wwdtm_core::appearance::ShowAppearance> {
    Ok(wwdtm_core::appearance::ShowAppearance {
      show_id:     self.show_id,
      date:        decode_date(&self.date)?,
      best_of:     self.best_of,
      repeat_show: self.repeat_show_id.is_some(),
    })
  }
}
