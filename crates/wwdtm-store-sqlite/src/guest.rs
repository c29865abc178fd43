//! Not My Job guests: [`Guests`] and [`GuestAppearances`].

use rusqlite::params;
use tracing::debug;
use wwdtm_core::{
  appearance::Appearances,
  entity::EntityKind,
  guest::{Guest, GuestAppearance, GuestDetails},
  valid_id,
};

use crate::{
  Database, Result,
  accessor::{DetailsAccessor, SlugAccessor},
  encode::RawShowAppearance,
  utility::{self, GUESTS, PersonRecord, SlugUtility},
};

fn into_guest(record: PersonRecord) -> Guest {
  let PersonRecord { person, .. } = record;
  Guest { id: person.id, name: person.name, slug: person.slug }
}

// ─── Appearances ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GuestAppearances {
  db:      Database,
  utility: SlugUtility,
}

impl GuestAppearances {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Guest);
    Self { db, utility }
  }

  /// Appearance counts and rows for a guest, ordered by show date.
  pub fn retrieve_appearances_by_id(&self, id: i64) -> Result<Appearances<GuestAppearance>> {
    if !valid_id(&id) {
      return Ok(Appearances::default());
    }

    let count = utility::appearance_count(&self.db, &GUESTS, id)?;

    let mut stmt = self.db.connection().prepare_cached(
      "SELECT s.showid, s.showdate, s.bestof, s.repeatshowid,
              gm.guestscore, gm.exception
       FROM ww_showguestmap gm
       JOIN ww_shows s ON s.showid = gm.showid
       WHERE gm.guestid = ?1
       ORDER BY s.showdate ASC",
    )?;
    let rows = stmt
      .query_map(params![id], |row| {
        Ok((RawShowAppearance::from_row(row, 0)?, row.get(4)?, row.get(5)?))
      })?
      .collect::<rusqlite::Result<Vec<(RawShowAppearance, Option<i64>, bool)>>>()?;

    let shows = rows
      .into_iter()
      .map(|(show, score, score_exception)| {
        Ok(GuestAppearance { show: show.into_appearance()?, score, score_exception })
      })
      .collect::<Result<Vec<_>>>()?;

    debug!(guest_id = id, shows = shows.len(), "retrieved guest appearances");
    Ok(Appearances { count, shows })
  }

  pub fn retrieve_appearances_by_slug(&self, slug: &str) -> Result<Appearances<GuestAppearance>> {
    self.utility.with_slug(slug, |id| self.retrieve_appearances_by_id(id))
  }
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Guest retrieval. Listings skip the `none` placeholder guest.
#[derive(Clone)]
pub struct Guests {
  db:          Database,
  utility:     SlugUtility,
  appearances: GuestAppearances,
}

impl Guests {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Guest),
      appearances: GuestAppearances::new(db.clone()),
      db,
    }
  }

  pub fn appearances(&self) -> &GuestAppearances { &self.appearances }

  /// Every guest, ordered by name.
  pub fn retrieve_all(&self) -> Result<Vec<Guest>> {
    Ok(utility::all_people(&self.db, &GUESTS)?.into_iter().map(into_guest).collect())
  }

  pub fn retrieve_all_details(&self) -> Result<Vec<GuestDetails>> {
    self
      .retrieve_all()?
      .into_iter()
      .map(|info| self.details(info))
      .collect()
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    utility::all_ids(&self.db, &GUESTS, GUESTS.order_by)
  }

  pub fn retrieve_all_slugs(&self) -> Result<Vec<String>> { utility::all_slugs(&self.db, &GUESTS) }
}

impl SlugAccessor for Guests {
  type Info = Guest;

  fn utility(&self) -> &SlugUtility { &self.utility }

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Guest>> {
    Ok(utility::person_by_id(&self.db, &GUESTS, id)?.map(into_guest))
  }

  fn slug_of(info: &Guest) -> &str { &info.slug }
}

impl DetailsAccessor for Guests {
  type Details = GuestDetails;

  fn details(&self, info: Guest) -> Result<GuestDetails> {
    let appearances = self.appearances.retrieve_appearances_by_id(info.id)?;
    Ok(GuestDetails { info, appearances })
  }
}
