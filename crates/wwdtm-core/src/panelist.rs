//! Panelists, their appearances and scoring statistics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
  appearance::{Appearances, ShowAppearance},
  rank::{Rank, Ranking},
  stats::{DecimalScoring, Scoring},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panelist {
  pub id:       i64,
  pub name:     String,
  pub slug:     String,
  pub gender:   Option<String>,
  pub pronouns: Vec<String>,
}

// ─── Scores ──────────────────────────────────────────────────────────────────

/// Which score column a panelist payload is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMode {
  #[default]
  Integer,
  /// Use the decimal score column. Only meaningful when the database has one.
  Decimal,
}

/// A panelist score in either representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Score {
  Integer(i64),
  Decimal(Decimal),
}

// ─── Appearances ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PanelistAppearanceCount {
  pub regular_shows:     u32,
  pub all_shows:         u32,
  /// Regular shows with a recorded score.
  pub shows_with_scores: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelistAppearance {
  #[serde(flatten)]
  pub show:                    ShowAppearance,
  pub lightning_round_start:   Option<i64>,
  pub lightning_round_correct: Option<i64>,
  pub score:                   Option<Score>,
  pub rank:                    Option<Rank>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
  pub show_id:   i64,
  pub show_date: NaiveDate,
}

/// First and most recent regular-show appearances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestones {
  pub first:       Milestone,
  pub most_recent: Milestone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppearanceSummary {
  pub milestones:  Option<Milestones>,
  #[serde(flatten)]
  pub appearances: Appearances<PanelistAppearance, PanelistAppearanceCount>,
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Times a panelist's story was picked in Bluff the Listener, and times it
/// was the true one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BluffCounts {
  pub chosen:  u32,
  pub correct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
  pub scoring:         Scoring,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scoring_decimal: Option<DecimalScoring>,
  pub ranking:         Ranking,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelistDetails {
  #[serde(flatten)]
  pub info:        Panelist,
  /// `None` for a panelist with no scored regular appearances.
  pub statistics:  Option<Statistics>,
  pub bluffs:      BluffCounts,
  pub appearances: AppearanceSummary,
}
