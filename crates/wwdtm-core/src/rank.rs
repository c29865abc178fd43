//! End-of-show panelist placement.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// Placement code stored per panelist appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
  First,
  FirstTied,
  Second,
  SecondTied,
  Third,
}

impl Rank {
  pub const ALL: [Rank; 5] = [
    Rank::First,
    Rank::FirstTied,
    Rank::Second,
    Rank::SecondTied,
    Rank::Third,
  ];

  pub const fn code(self) -> &'static str {
    match self {
      Rank::First => "1",
      Rank::FirstTied => "1t",
      Rank::Second => "2",
      Rank::SecondTied => "2t",
      Rank::Third => "3",
    }
  }

  /// Parse a stored rank column. Blank or unknown codes map to `None`.
  pub fn from_column(value: Option<&str>) -> Option<Rank> {
    value.and_then(|v| v.trim().parse().ok())
  }
}

impl fmt::Display for Rank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRank(pub String);

impl fmt::Display for UnknownRank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown rank code: {:?}", self.0)
  }
}

impl std::error::Error for UnknownRank {}

impl FromStr for Rank {
  type Err = UnknownRank;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Rank::ALL
      .into_iter()
      .find(|r| r.code() == s)
      .ok_or_else(|| UnknownRank(s.to_owned()))
  }
}

impl Serialize for Rank {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.code())
  }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Number of regular shows finished at each placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankCounts {
  pub first:       u32,
  pub first_tied:  u32,
  pub second:      u32,
  pub second_tied: u32,
  pub third:       u32,
}

impl RankCounts {
  pub fn get(&self, rank: Rank) -> u32 {
    match rank {
      Rank::First => self.first,
      Rank::FirstTied => self.first_tied,
      Rank::Second => self.second,
      Rank::SecondTied => self.second_tied,
      Rank::Third => self.third,
    }
  }

  pub fn get_mut(&mut self, rank: Rank) -> &mut u32 {
    match rank {
      Rank::First => &mut self.first,
      Rank::FirstTied => &mut self.first_tied,
      Rank::Second => &mut self.second,
      Rank::SecondTied => &mut self.second_tied,
      Rank::Third => &mut self.third,
    }
  }
}

/// Share of scored appearances finished at each placement, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankPercentages {
  pub first:       f64,
  pub first_tied:  f64,
  pub second:      f64,
  pub second_tied: f64,
  pub third:       f64,
}

impl RankPercentages {
  /// `100 * count / appearances` per placement, rounded to 5 places.
  ///
  /// Returns `None` when `appearances` is zero.
  pub fn from_counts(counts: &RankCounts, appearances: usize) -> Option<Self> {
    if appearances == 0 {
      return None;
    }
    let pct = |rank| crate::stats::round5(100.0 * f64::from(counts.get(rank)) / appearances as f64);
    Some(Self {
      first:       pct(Rank::First),
      first_tied:  pct(Rank::FirstTied),
      second:      pct(Rank::Second),
      second_tied: pct(Rank::SecondTied),
      third:       pct(Rank::Third),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
  pub rank:       RankCounts,
  pub percentage: RankPercentages,
}
