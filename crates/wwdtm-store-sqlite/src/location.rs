//! Recording locations: [`Locations`] and [`LocationRecordings`].

use rusqlite::params;
use tracing::debug;
use wwdtm_core::{
  appearance::{Appearances, Recordings},
  entity::EntityKind,
  location::{Coordinates, Location, LocationDetails, LocationSort},
  slug::{LocationParts, slugify_location},
  valid_id,
};

use crate::{
  Database, Result,
  accessor::{DetailsAccessor, SlugAccessor},
  encode::{RawShowAppearance, SqlDecimal, decimal, non_blank},
  utility::{self, LOCATIONS, SlugUtility},
};

/// Columns read by [`RawLocation::from_row`]; needs [`POSTAL_JOIN`].
pub(crate) const LOCATION_COLUMNS: &str =
  "l.locationid, l.city, l.state, l.venue, l.locationslug, l.latitude, l.longitude, pa.name";

pub(crate) const POSTAL_JOIN: &str =
  "LEFT JOIN ww_postal_abbreviations pa ON pa.postal_abbreviation = l.state";

/// Raw columns of a `ww_locations` row joined with its state name.
pub(crate) struct RawLocation {
  pub id:         i64,
  pub city:       Option<String>,
  pub state:      Option<String>,
  pub venue:      Option<String>,
  pub slug:       Option<String>,
  pub latitude:   Option<SqlDecimal>,
  pub longitude:  Option<SqlDecimal>,
  pub state_name: Option<String>,
}

impl RawLocation {
  pub fn from_row(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(start)?,
      city:       row.get(start + 1)?,
      state:      row.get(start + 2)?,
      venue:      row.get(start + 3)?,
      slug:       row.get(start + 4)?,
      latitude:   row.get(start + 5)?,
      longitude:  row.get(start + 6)?,
      state_name: row.get(start + 7)?,
    })
  }

  /// Apply the slug fallback and pair up the coordinates.
  pub fn into_location(self) -> Result<Location> {
    let slug = match non_blank(self.slug) {
      Some(slug) => slug,
      None => slugify_location(LocationParts {
        id:    Some(self.id),
        venue: self.venue.as_deref(),
        city:  self.city.as_deref(),
        state: self.state.as_deref(),
      })?,
    };
    Ok(Location {
      id: self.id,
      city: self.city,
      state: self.state,
      state_name: self.state_name,
      venue: self.venue,
      coordinates: Coordinates::from_pair(decimal(self.latitude), decimal(self.longitude)),
      slug,
    })
  }
}

fn order_by(sort: LocationSort) -> &'static str {
  match sort {
    LocationSort::State => LOCATIONS.order_by,
    LocationSort::Venue => "venue ASC, city ASC, state ASC",
  }
}

// ─── Recordings ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LocationRecordings {
  db:      Database,
  utility: SlugUtility,
}

impl LocationRecordings {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Location);
    Self { db, utility }
  }

  /// Shows recorded at a location, ordered by show date.
  pub fn retrieve_recordings_by_id(&self, id: i64) -> Result<Recordings> {
    if !valid_id(&id) {
      return Ok(Appearances::default());
    }

    let count = utility::appearance_count(&self.db, &LOCATIONS, id)?;

    let mut stmt = self.db.connection().prepare_cached(
      "SELECT s.showid, s.showdate, s.bestof, s.repeatshowid
       FROM ww_showlocationmap lm
       JOIN ww_shows s ON s.showid = lm.showid
       WHERE lm.locationid = ?1
       ORDER BY s.showdate ASC",
    )?;
    let rows = stmt
      .query_map(params![id], |row| RawShowAppearance::from_row(row, 0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    let shows = rows
      .into_iter()
      .map(RawShowAppearance::into_appearance)
      .collect::<Result<Vec<_>>>()?;

    debug!(location_id = id, shows = shows.len(), "retrieved location recordings");
    Ok(Appearances { count, shows })
  }

  pub fn retrieve_recordings_by_slug(&self, slug: &str) -> Result<Recordings> {
    self.utility.with_slug(slug, |id| self.retrieve_recordings_by_id(id))
  }
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Location retrieval. Listings skip the `tbd` placeholder location.
#[derive(Clone)]
pub struct Locations {
  db:         Database,
  utility:    SlugUtility,
  recordings: LocationRecordings,
}

impl Locations {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Location),
      recordings: LocationRecordings::new(db.clone()),
      db,
    }
  }

  pub fn recordings(&self) -> &LocationRecordings { &self.recordings }

  pub fn retrieve_all(&self, sort: LocationSort) -> Result<Vec<Location>> {
    let sql = format!(
      "SELECT {LOCATION_COLUMNS} FROM ww_locations l {POSTAL_JOIN}
       WHERE {} ORDER BY {}",
      LOCATIONS.not_placeholder(),
      order_by(sort)
    );
    let mut stmt = self.db.connection().prepare_cached(&sql)?;
    let rows = stmt
      .query_map([], |row| RawLocation::from_row(row, 0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(RawLocation::into_location).collect()
  }

  pub fn retrieve_all_details(&self, sort: LocationSort) -> Result<Vec<LocationDetails>> {
    self
      .retrieve_all(sort)?
      .into_iter()
      .map(|info| self.details(info))
      .collect()
  }

  pub fn retrieve_all_ids(&self, sort: LocationSort) -> Result<Vec<i64>> {
    utility::all_ids(&self.db, &LOCATIONS, order_by(sort))
  }

  pub fn retrieve_all_slugs(&self, sort: LocationSort) -> Result<Vec<String>> {
    Ok(self.retrieve_all(sort)?.into_iter().map(|l| l.slug).collect())
  }
}

impl SlugAccessor for Locations {
  type Info = Location;

  fn utility(&self) -> &SlugUtility { &self.utility }

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Location>> {
    if !valid_id(&id) {
      return Ok(None);
    }
    let sql = format!(
      "SELECT {LOCATION_COLUMNS} FROM ww_locations l {POSTAL_JOIN}
       WHERE l.locationid = ?1 LIMIT 1"
    );
    let mut stmt = self.db.connection().prepare_cached(&sql)?;
    let mut rows = stmt
      .query_map(params![id], |row| RawLocation::from_row(row, 0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.pop().map(RawLocation::into_location).transpose()
  }

  fn slug_of(info: &Location) -> &str { &info.slug }
}

impl DetailsAccessor for Locations {
  type Details = LocationDetails;

  fn details(&self, info: Location) -> Result<LocationDetails> {
    let recordings = self.recordings.retrieve_recordings_by_id(info.id)?;
    Ok(LocationDetails { info, recordings })
  }
}
