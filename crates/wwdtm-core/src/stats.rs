//! Score aggregates and histograms.
//!
//! Histograms span the global score range across every panelist so that two
//! panelists' histograms line up bucket for bucket.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps as _, RoundingStrategy};
use serde::Serialize;

/// Round to 5 decimal places, half away from zero.
pub fn round5(value: f64) -> f64 { (value * 100_000.0).round() / 100_000.0 }

/// [`round5`] for decimals: 5 places, half away from zero.
pub fn round5_decimal(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(5, RoundingStrategy::MidpointAwayFromZero)
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Aggregates over integer scores. Standard deviation is the population value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoring {
  pub minimum:            i64,
  pub maximum:            i64,
  pub mean:               f64,
  pub median:             f64,
  pub standard_deviation: f64,
  pub total:              i64,
}

impl Scoring {
  /// `None` when `scores` is empty.
  pub fn from_scores(scores: &[i64]) -> Option<Self> {
    let minimum = *scores.iter().min()?;
    let maximum = *scores.iter().max()?;
    let total: i64 = scores.iter().sum();
    let n = scores.len() as f64;
    let mean = total as f64 / n;

    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
      sorted[mid] as f64
    } else {
      (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    };

    let variance = scores
      .iter()
      .map(|&s| (s as f64 - mean).powi(2))
      .sum::<f64>()
      / n;

    Some(Self {
      minimum,
      maximum,
      mean: round5(mean),
      median,
      standard_deviation: round5(variance.sqrt()),
      total,
    })
  }
}

/// Aggregates over decimal scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecimalScoring {
  pub minimum:            Decimal,
  pub maximum:            Decimal,
  pub mean:               Decimal,
  pub median:             Decimal,
  pub standard_deviation: Decimal,
  pub total:              Decimal,
}

impl DecimalScoring {
  /// `None` when `scores` is empty.
  pub fn from_scores(scores: &[Decimal]) -> Option<Self> {
    let minimum = *scores.iter().min()?;
    let maximum = *scores.iter().max()?;
    let total: Decimal = scores.iter().sum();
    let n = Decimal::from(scores.len());
    let mean = total / n;

    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
      sorted[mid]
    } else {
      (sorted[mid - 1] + sorted[mid]) / Decimal::TWO
    };

    let variance = scores
      .iter()
      .map(|&s| (s - mean) * (s - mean))
      .sum::<Decimal>()
      / n;
    let standard_deviation = variance.sqrt().unwrap_or_default();

    Some(Self {
      minimum: minimum.normalize(),
      maximum: maximum.normalize(),
      mean: round5_decimal(mean).normalize(),
      median: median.normalize(),
      standard_deviation: round5_decimal(standard_deviation).normalize(),
      total: total.normalize(),
    })
  }
}

// ─── Histograms ──────────────────────────────────────────────────────────────

/// One zeroed bucket for every integer in `min..=max`.
pub fn integer_buckets(min: i64, max: i64) -> BTreeMap<i64, u32> {
  (min..=max).map(|score| (score, 0)).collect()
}

/// Zeroed buckets at every whole and half point from `floor(min)` through
/// `floor(max) + 0.5`. Keys are normalized (`3`, `3.5`, not `3.0`).
pub fn half_point_buckets(min: Decimal, max: Decimal) -> BTreeMap<Decimal, u32> {
  let half = Decimal::new(5, 1);
  let upper = max.floor();
  let mut buckets = BTreeMap::new();
  let mut score = min.floor();
  while score <= upper {
    buckets.insert(score.normalize(), 0);
    buckets.insert((score + half).normalize(), 0);
    score += Decimal::ONE;
  }
  buckets
}

/// Score values and their counts as two parallel lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedScores<K> {
  pub score: Vec<K>,
  pub count: Vec<u32>,
}

impl<K> Default for GroupedScores<K> {
  fn default() -> Self { Self { score: Vec::new(), count: Vec::new() } }
}

impl<K: Ord> GroupedScores<K> {
  /// Add `observed` counts onto the zeroed `buckets`.
  pub fn fill(
    mut buckets: BTreeMap<K, u32>,
    observed: impl IntoIterator<Item = (K, u32)>,
  ) -> Self {
    for (score, count) in observed {
      *buckets.entry(score).or_default() += count;
    }
    let (score, count) = buckets.into_iter().unzip();
    Self { score, count }
  }
}

impl<K: Clone> GroupedScores<K> {
  /// The same histogram as `(score, count)` pairs.
  pub fn ordered_pairs(&self) -> Vec<(K, u32)> {
    self.score.iter().cloned().zip(self.count.iter().copied()).collect()
  }
}

/// Show dates and the matching scores as two parallel lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoresList<S> {
  pub shows:  Vec<NaiveDate>,
  pub scores: Vec<S>,
}

impl<S> Default for ScoresList<S> {
  fn default() -> Self { Self { shows: Vec::new(), scores: Vec::new() } }
}

impl<S> FromIterator<(NaiveDate, S)> for ScoresList<S> {
  fn from_iter<I: IntoIterator<Item = (NaiveDate, S)>>(iter: I) -> Self {
    let (shows, scores) = iter.into_iter().unzip();
    Self { shows, scores }
  }
}
