use rusqlite::params;
use tracing::trace;
use wwdtm_core::{
  entity::EntityKind,
  panelist::{BluffCounts, ScoreMode, Statistics},
  rank::{Rank, RankCounts, RankPercentages, Ranking},
  stats::{DecimalScoring, Scoring},
  valid_id,
};

use super::{decimal_scores::PanelistDecimalScores, scores::PanelistScores};
use crate::{Database, Result, utility::SlugUtility};

/// Bluff the Listener counts, placements and scoring aggregates.
#[derive(Clone)]
pub struct PanelistStatistics {
  db:             Database,
  utility:        SlugUtility,
  scores:         PanelistScores,
  decimal_scores: PanelistDecimalScores,
}

impl PanelistStatistics {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Panelist),
      scores: PanelistScores::new(db.clone()),
      decimal_scores: PanelistDecimalScores::new(db.clone()),
      db,
    }
  }

  /// Times the panelist's story was chosen and times it was the real one,
  /// on shows that are not repeats.
  pub fn retrieve_bluffs_by_id(&self, id: i64) -> Result<BluffCounts> {
    if !valid_id(&id) {
      return Ok(BluffCounts::default());
    }
    let mut stmt = self.db.connection().prepare_cached(
      "SELECT
         COALESCE(SUM(b.chosenbluffpnlid = ?1), 0),
         COALESCE(SUM(b.correctbluffpnlid = ?1), 0)
       FROM ww_showbluffmap b
       JOIN ww_shows s ON s.showid = b.showid
       WHERE s.repeatshowid IS NULL",
    )?;
    Ok(stmt.query_row(params![id], |row| {
      Ok(BluffCounts { chosen: row.get(0)?, correct: row.get(1)? })
    })?)
  }

  pub fn retrieve_bluffs_by_slug(&self, slug: &str) -> Result<BluffCounts> {
    self.utility.with_slug(slug, |id| self.retrieve_bluffs_by_id(id))
  }

  /// Placement counts over regular shows. Unknown or blank codes are skipped.
  pub fn retrieve_rank_info_by_id(&self, id: i64) -> Result<RankCounts> {
    let mut counts = RankCounts::default();
    if !valid_id(&id) {
      return Ok(counts);
    }
    let mut stmt = self.db.connection().prepare_cached(
      "SELECT pm.showpnlrank, COUNT(*)
       FROM ww_showpnlmap pm
       JOIN ww_shows s ON s.showid = pm.showid
       WHERE pm.panelistid = ?1
         AND s.bestof = 0 AND s.repeatshowid IS NULL
       GROUP BY pm.showpnlrank",
    )?;
    let rows = stmt
      .query_map(params![id], |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, u32>(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    for (code, count) in rows {
      match Rank::from_column(code.as_deref()) {
        Some(rank) => *counts.get_mut(rank) += count,
        None => trace!(panelist_id = id, ?code, "skipping unranked appearances"),
      }
    }
    Ok(counts)
  }

  pub fn retrieve_rank_info_by_slug(&self, slug: &str) -> Result<RankCounts> {
    self.utility.with_slug(slug, |id| self.retrieve_rank_info_by_id(id))
  }

  /// Scoring aggregates and placement breakdown over regular shows.
  ///
  /// Returns `None` for a panelist with no scored regular appearances, so
  /// percentages are never computed against a zero denominator. The decimal
  /// aggregate is only present for [`ScoreMode::Decimal`].
  pub fn retrieve_statistics_by_id(&self, id: i64, mode: ScoreMode) -> Result<Option<Statistics>> {
    let scores = self.scores.retrieve_scores_by_id(id)?;
    let Some(scoring) = Scoring::from_scores(&scores) else {
      return Ok(None);
    };
    let scoring_decimal = match mode {
      ScoreMode::Integer => None,
      ScoreMode::Decimal => {
        DecimalScoring::from_scores(&self.decimal_scores.retrieve_scores_by_id(id)?)
      }
    };

    let rank = self.retrieve_rank_info_by_id(id)?;
    let Some(percentage) = RankPercentages::from_counts(&rank, scores.len()) else {
      return Ok(None);
    };

    Ok(Some(Statistics { scoring, scoring_decimal, ranking: Ranking { rank, percentage } }))
  }

  pub fn retrieve_statistics_by_slug(
    &self,
    slug: &str,
    mode: ScoreMode,
  ) -> Result<Option<Statistics>> {
    self.utility.with_slug(slug, |id| self.retrieve_statistics_by_id(id, mode))
  }
}
