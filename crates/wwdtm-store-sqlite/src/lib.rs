//! SQLite backend for the Wait Wait Don't Tell Me! stats data layer.
//!
//! Every accessor holds a clone of one [`Database`] handle and issues
//! read-only, parameterised queries against it. Invalid or unknown IDs and
//! slugs are reported as `None`, `false` or empty collections; only storage
//! failures surface as [`Error`].

mod encode;
mod utility;

pub mod accessor;
pub mod database;
pub mod error;
pub mod guest;
pub mod host;
pub mod location;
pub mod panelist;
pub mod pronoun;
pub mod schema;
pub mod scorekeeper;
pub mod show;

pub use accessor::{DetailsAccessor, SlugAccessor};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use guest::{GuestAppearances, Guests};
pub use host::{HostAppearances, Hosts};
pub use location::{LocationRecordings, Locations};
pub use panelist::{
  PanelistAppearances, PanelistDecimalScores, PanelistScores, PanelistStatistics, Panelists,
};
pub use pronoun::Pronouns;
pub use scorekeeper::{ScorekeeperAppearances, Scorekeepers};
pub use show::{ShowInfo, ShowInfoMultiple, ShowUtility, Shows};
pub use utility::SlugUtility;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod tests;
