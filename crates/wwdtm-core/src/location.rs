//! Recording locations.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::appearance::Recordings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinates {
  pub latitude:  Decimal,
  pub longitude: Decimal,
}

impl Coordinates {
  /// Coordinates exist only when both halves are present.
  pub fn from_pair(latitude: Option<Decimal>, longitude: Option<Decimal>) -> Option<Self> {
    Some(Self { latitude: latitude?.normalize(), longitude: longitude?.normalize() })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
  pub id:          i64,
  pub city:        Option<String>,
  /// Postal abbreviation.
  pub state:       Option<String>,
  /// Full state or province name, when the abbreviation is known.
  pub state_name:  Option<String>,
  pub venue:       Option<String>,
  pub coordinates: Option<Coordinates>,
  pub slug:        String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetails {
  #[serde(flatten)]
  pub info:       Location,
  pub recordings: Recordings,
}

/// Listing order for locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationSort {
  /// State, then city, then venue.
  #[default]
  State,
  /// Venue, then city, then state.
  Venue,
}
