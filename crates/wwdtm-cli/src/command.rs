//! Subcommands and their dispatch onto the store accessors.

use anyhow::{Context as _, anyhow};
use chrono::{Datelike as _, Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use wwdtm_core::{location::LocationSort, panelist::ScoreMode};
use wwdtm_store_sqlite::{
  Database, DetailsAccessor as _, Guests, Hosts, Locations, PanelistDecimalScores, PanelistScores,
  Panelists, Pronouns, Scorekeepers, Shows, SlugAccessor as _,
  show::{DEFAULT_DAYS_AHEAD, DEFAULT_DAYS_BACK},
};

#[derive(Subcommand)]
pub enum Command {
  /// Not My Job guests.
  Guest {
    #[command(subcommand)]
    action: EntityAction,
  },
  Host {
    #[command(subcommand)]
    action: EntityAction,
  },
  Scorekeeper {
    #[command(subcommand)]
    action: EntityAction,
  },
  Panelist {
    #[command(subcommand)]
    action: PanelistAction,
  },
  /// Recording locations.
  Location {
    #[command(subcommand)]
    action: EntityAction,
    /// List by venue instead of by state.
    #[arg(long, global = true)]
    by_venue: bool,
  },
  Show {
    #[command(subcommand)]
    action: ShowAction,
  },
  /// The pronouns reference table.
  Pronouns,
}

#[derive(Subcommand)]
pub enum EntityAction {
  /// Every entry, without placeholders.
  List,
  /// One entry by id or slug. Prefix with `id:` or `slug:` to force either.
  Get {
    key: Key,
    #[command(flatten)]
    opts: DetailOpts,
  },
  Random {
    #[command(flatten)]
    opts: DetailOpts,
  },
}

#[derive(Subcommand)]
pub enum PanelistAction {
  #[command(flatten)]
  Entity(EntityAction),
  /// Scores from regular shows.
  Scores {
    key: Key,
    /// Histogram over the global score range instead of per-show scores.
    #[arg(long)]
    grouped: bool,
    #[command(flatten)]
    opts: DetailOpts,
  },
  /// Regular-show appearances per year.
  Yearly { key: Key },
}

#[derive(Subcommand)]
pub enum ShowAction {
  /// Every show, or the shows of one year.
  List {
    #[arg(long)]
    year: Option<i32>,
  },
  /// One show by id or `YYYY-MM-DD` date.
  Get {
    key: ShowKey,
    #[command(flatten)]
    opts: DetailOpts,
  },
  /// Shows around today.
  Recent {
    #[arg(long, default_value_t = DEFAULT_DAYS_AHEAD)]
    days_ahead: u64,
    #[arg(long, default_value_t = DEFAULT_DAYS_BACK)]
    days_back:  u64,
    #[command(flatten)]
    opts:       DetailOpts,
  },
  /// Show counts by type, for one year or every year.
  Counts { year: Option<i32> },
  /// Panelist scores for each regular show of a year.
  Scores { year: i32 },
  Random {
    #[command(flatten)]
    opts: DetailOpts,
  },
}

#[derive(Args, Clone, Copy)]
pub struct DetailOpts {
  /// Include appearances, statistics or show composition.
  #[arg(long)]
  details: bool,
  /// Read decimal scores. Needs a database with decimal score support.
  #[arg(long)]
  decimal: bool,
}

impl DetailOpts {
  fn mode(self) -> ScoreMode {
    if self.decimal { ScoreMode::Decimal } else { ScoreMode::Integer }
  }
}

/// An entity addressed by numeric id or by slug.
///
/// A bare integer is an id. `slug:` forces a slug, for slugs that are all
/// digits; `id:` forces an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
  Id(i64),
  Slug(String),
}

impl std::str::FromStr for Key {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if let Some(slug) = s.strip_prefix("slug:") {
      return Ok(Key::Slug(slug.trim().to_owned()));
    }
    if let Some(id) = s.strip_prefix("id:") {
      return id
        .trim()
        .parse()
        .map(Key::Id)
        .map_err(|e| format!("expected an integer id after `id:`: {e}"));
    }
    Ok(match s.parse() {
      Ok(id) => Key::Id(id),
      Err(_) => Key::Slug(s.to_owned()),
    })
  }
}

/// A show addressed by id or by air date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowKey {
  Id(i64),
  Date(NaiveDate),
}

impl std::str::FromStr for ShowKey {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if let Ok(id) = s.parse() {
      return Ok(ShowKey::Id(id));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(ShowKey::Date)
      .map_err(|e| format!("expected a show id or YYYY-MM-DD date: {e}"))
  }
}

fn json(value: impl Serialize) -> anyhow::Result<Value> { Ok(serde_json::to_value(value)?) }

fn found<T: Serialize>(value: Option<T>, what: &str) -> anyhow::Result<Value> {
  json(value.with_context(|| format!("no {what} found"))?)
}

/// Dispatch one lookup for an entity accessor with the standard method family.
macro_rules! entity {
  ($accessor:expr, $action:expr, $what:literal, $($list:tt)+) => {{
    let accessor = $accessor;
    match $action {
      EntityAction::List => json(accessor.$($list)+?),
      EntityAction::Get { key, opts } => match (key, opts.details) {
        (Key::Id(id), false) => found(accessor.retrieve_by_id(id)?, $what),
        (Key::Id(id), true) => found(accessor.retrieve_details_by_id(id)?, $what),
        (Key::Slug(slug), false) => found(accessor.retrieve_by_slug(&slug)?, $what),
        (Key::Slug(slug), true) => found(accessor.retrieve_details_by_slug(&slug)?, $what),
      },
      EntityAction::Random { opts } if opts.details => {
        found(accessor.retrieve_random_details()?, $what)
      }
      EntityAction::Random { .. } => found(accessor.retrieve_random()?, $what),
    }
  }};
}

impl Command {
  pub fn run(self, db: Database) -> anyhow::Result<Value> {
    match self {
      Command::Guest { action } => entity!(Guests::new(db), action, "guest", retrieve_all()),
      Command::Host { action } => entity!(Hosts::new(db), action, "host", retrieve_all()),
      Command::Scorekeeper { action } => {
        entity!(Scorekeepers::new(db), action, "scorekeeper", retrieve_all())
      }
      Command::Location { action, by_venue } => {
        let sort = if by_venue { LocationSort::Venue } else { LocationSort::State };
        entity!(Locations::new(db), action, "location", retrieve_all(sort))
      }
      Command::Panelist { action } => run_panelist(db, action),
      Command::Show { action } => run_show(Shows::new(db), action),
      Command::Pronouns => json(Pronouns::new(db).retrieve_all()?),
    }
  }
}

fn run_panelist(db: Database, action: PanelistAction) -> anyhow::Result<Value> {
  let panelists = Panelists::new(db.clone());
  let resolve = |key: Key| -> anyhow::Result<i64> {
    match key {
      Key::Id(id) => Ok(id),
      Key::Slug(slug) => panelists
        .utility()
        .convert_slug_to_id(&slug)?
        .ok_or_else(|| anyhow!("no panelist with slug {slug:?}")),
    }
  };

  match action {
    PanelistAction::Entity(EntityAction::List) => json(panelists.retrieve_all()?),
    PanelistAction::Entity(EntityAction::Get { key, opts }) if opts.details => {
      found(panelists.retrieve_details_by_id(resolve(key)?, opts.mode())?, "panelist")
    }
    PanelistAction::Entity(EntityAction::Get { key, .. }) => {
      found(panelists.retrieve_by_id(resolve(key)?)?, "panelist")
    }
    PanelistAction::Entity(EntityAction::Random { opts }) if opts.details => {
      found(panelists.retrieve_random_details(opts.mode())?, "panelist")
    }
    PanelistAction::Entity(EntityAction::Random { .. }) => {
      found(panelists.retrieve_random()?, "panelist")
    }
    PanelistAction::Scores { key, grouped, opts } => {
      let id = resolve(key)?;
      match (opts.mode(), grouped) {
        (ScoreMode::Integer, false) => {
          json(PanelistScores::new(db).retrieve_scores_list_by_id(id)?)
        }
        (ScoreMode::Integer, true) => {
          json(PanelistScores::new(db).retrieve_scores_grouped_list_by_id(id)?)
        }
        (ScoreMode::Decimal, false) => {
          json(PanelistDecimalScores::new(db).retrieve_scores_list_by_id(id)?)
        }
        (ScoreMode::Decimal, true) => {
          json(PanelistDecimalScores::new(db).retrieve_scores_grouped_list_by_id(id)?)
        }
      }
    }
    PanelistAction::Yearly { key } => {
      json(panelists.appearances().retrieve_yearly_appearances_by_id(resolve(key)?)?)
    }
  }
}

fn run_show(shows: Shows, action: ShowAction) -> anyhow::Result<Value> {
  match action {
    ShowAction::List { year: Some(year) } => json(shows.retrieve_by_year(year)?),
    ShowAction::List { year: None } => json(shows.retrieve_all()?),
    ShowAction::Get { key, opts } => {
      let id = match key {
        ShowKey::Id(id) => Some(id),
        ShowKey::Date(date) => {
          shows.utility().convert_date_to_id(date.year(), date.month(), date.day())?
        }
      };
      let id = id.context("no show found")?;
      if opts.details {
        found(shows.retrieve_details_by_id(id, opts.mode())?, "show")
      } else {
        found(shows.retrieve_by_id(id)?, "show")
      }
    }
    ShowAction::Recent { days_ahead, days_back, opts } => {
      let today = Local::now().date_naive();
      if opts.details {
        json(shows.retrieve_recent_details(today, days_ahead, days_back, opts.mode())?)
      } else {
        json(shows.retrieve_recent(today, days_ahead, days_back)?)
      }
    }
    ShowAction::Counts { year: Some(year) } => json(shows.retrieve_counts_by_year(year)?),
    ShowAction::Counts { year: None } => json(shows.retrieve_all_counts()?),
    ShowAction::Scores { year } => json(shows.retrieve_scores_by_year(year)?),
    ShowAction::Random { opts } if opts.details => {
      found(shows.retrieve_random_details(opts.mode())?, "show")
    }
    ShowAction::Random { .. } => found(shows.retrieve_random()?, "show"),
  }
}
