//! Shows and the composed per-show record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{entity::PersonRef, location::Location, panelist::Score, rank::Rank};

/// A show row on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
  pub id:                 i64,
  pub date:               NaiveDate,
  pub best_of:            bool,
  pub repeat_show:        bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub original_show_id:   Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub original_show_date: Option<NaiveDate>,
  pub url:                Option<String>,
}

// ─── Core info ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowHost {
  #[serde(flatten)]
  pub person: PersonRef,
  pub guest:  bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowScorekeeper {
  #[serde(flatten)]
  pub person:      PersonRef,
  pub guest:       bool,
  pub description: Option<String>,
}

/// Show row joined with location, host, scorekeeper, description and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowCoreInfo {
  #[serde(flatten)]
  pub show:        Show,
  pub description: Option<String>,
  pub notes:       Option<String>,
  pub location:    Location,
  pub host:        ShowHost,
  pub scorekeeper: ShowScorekeeper,
}

// ─── Per-show participants ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowPanelist {
  #[serde(flatten)]
  pub person:                  PersonRef,
  pub lightning_round_start:   Option<i64>,
  pub lightning_round_correct: Option<i64>,
  pub score:                   Option<Score>,
  pub rank:                    Option<Rank>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowGuest {
  #[serde(flatten)]
  pub person:          PersonRef,
  pub score:           Option<i64>,
  pub score_exception: bool,
}

/// One Bluff the Listener segment. Either panelist may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowBluff {
  pub segment:          i64,
  pub chosen_panelist:  Option<PersonRef>,
  pub correct_panelist: Option<PersonRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowDetails {
  #[serde(flatten)]
  pub info:      ShowCoreInfo,
  pub panelists: Vec<ShowPanelist>,
  pub bluffs:    Vec<ShowBluff>,
  pub guests:    Vec<ShowGuest>,
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Show counts by type. `total` is the sum of the other four.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowCounts {
  pub regular:        u32,
  pub best_of:        u32,
  pub repeat:         u32,
  pub repeat_best_of: u32,
  pub total:          u32,
}

impl ShowCounts {
  pub fn new(regular: u32, best_of: u32, repeat: u32, repeat_best_of: u32) -> Self {
    Self {
      regular,
      best_of,
      repeat,
      repeat_best_of,
      total: regular + best_of + repeat + repeat_best_of,
    }
  }

  /// Tally one show.
  pub fn add(&mut self, best_of: bool, repeat_show: bool) {
    match (best_of, repeat_show) {
      (false, false) => self.regular += 1,
      (true, false) => self.best_of += 1,
      (false, true) => self.repeat += 1,
      (true, true) => self.repeat_best_of += 1,
    }
    self.total += 1;
  }
}

/// Panelist scores for one regular show, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowScores {
  pub date:   NaiveDate,
  pub scores: Vec<i64>,
}
