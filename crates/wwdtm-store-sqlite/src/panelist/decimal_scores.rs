//! Decimal panelist scores, for databases that record half points.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wwdtm_core::{
  entity::EntityKind,
  panelist::ScoreMode,
  stats::{GroupedScores, ScoresList, half_point_buckets},
  valid_id,
};

use super::scores::{dated_scores, score_counts, score_range};
use crate::{Database, Result, encode::SqlDecimal, utility::SlugUtility};

/// Every method fails with [`crate::Error::DecimalScoresUnavailable`] when
/// the database has no decimal score column.
#[derive(Clone)]
pub struct PanelistDecimalScores {
  db:      Database,
  utility: SlugUtility,
}

impl PanelistDecimalScores {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Panelist);
    Self { db, utility }
  }

  fn column(&self) -> Result<&'static str> { self.db.score_column(ScoreMode::Decimal) }

  fn resolve(&self, slug: &str) -> Result<Option<i64>> { self.utility.convert_slug_to_id(slug) }

  pub fn retrieve_scores_by_id(&self, id: i64) -> Result<Vec<Decimal>> {
    Ok(self.retrieve_scores_ordered_pair_by_id(id)?.into_iter().map(|(_, s)| s).collect())
  }

  pub fn retrieve_scores_by_slug(&self, slug: &str) -> Result<Vec<Decimal>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_by_id(id),
      None => Ok(Vec::new()),
    }
  }

  /// Histogram over every whole and half point between the global minimum
  /// and maximum score. Empty when the panelist has no scores.
  pub fn retrieve_scores_grouped_list_by_id(&self, id: i64) -> Result<GroupedScores<Decimal>> {
    let column = self.column()?;
    if !valid_id(&id) {
      return Ok(GroupedScores::default());
    }
    let observed: Vec<(SqlDecimal, u32)> = score_counts(&self.db, id, column)?;
    if observed.is_empty() {
      return Ok(GroupedScores::default());
    }
    let Some((min, max)) = score_range::<SqlDecimal>(&self.db, column)? else {
      return Ok(GroupedScores::default());
    };
    Ok(GroupedScores::fill(
      half_point_buckets(min.0, max.0),
      observed.into_iter().map(|(score, count)| (score.0, count)),
    ))
  }

  pub fn retrieve_scores_grouped_list_by_slug(&self, slug: &str) -> Result<GroupedScores<Decimal>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_grouped_list_by_id(id),
      None => Ok(GroupedScores::default()),
    }
  }

  pub fn retrieve_scores_grouped_ordered_pair_by_id(&self, id: i64) -> Result<Vec<(Decimal, u32)>> {
    Ok(self.retrieve_scores_grouped_list_by_id(id)?.ordered_pairs())
  }

  pub fn retrieve_scores_grouped_ordered_pair_by_slug(
    &self,
    slug: &str,
  ) -> Result<Vec<(Decimal, u32)>> {
    Ok(self.retrieve_scores_grouped_list_by_slug(slug)?.ordered_pairs())
  }

  pub fn retrieve_scores_list_by_id(&self, id: i64) -> Result<ScoresList<Decimal>> {
    Ok(self.retrieve_scores_ordered_pair_by_id(id)?.into_iter().collect())
  }

  pub fn retrieve_scores_list_by_slug(&self, slug: &str) -> Result<ScoresList<Decimal>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_list_by_id(id),
      None => Ok(ScoresList::default()),
    }
  }

  pub fn retrieve_scores_ordered_pair_by_id(&self, id: i64) -> Result<Vec<(NaiveDate, Decimal)>> {
    let column = self.column()?;
    if !valid_id(&id) {
      return Ok(Vec::new());
    }
    Ok(
      dated_scores::<SqlDecimal>(&self.db, id, column)?
        .into_iter()
        .map(|(date, score)| (date, score.0))
        .collect(),
    )
  }

  pub fn retrieve_scores_ordered_pair_by_slug(
    &self,
    slug: &str,
  ) -> Result<Vec<(NaiveDate, Decimal)>> {
    match self.resolve(slug)? {
      Some(id) => self.retrieve_scores_ordered_pair_by_id(id),
      None => Ok(Vec::new()),
    }
  }
}
