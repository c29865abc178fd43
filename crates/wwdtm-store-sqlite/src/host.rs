//! Show hosts: [`Hosts`] and [`HostAppearances`].

use rusqlite::params;
use tracing::debug;
use wwdtm_core::{
  appearance::Appearances,
  entity::EntityKind,
  host::{Host, HostAppearance, HostDetails},
  valid_id,
};

use crate::{
  Database, Result,
  accessor::{DetailsAccessor, SlugAccessor},
  encode::RawShowAppearance,
  utility::{self, HOSTS, PersonRecord, SlugUtility},
};

fn into_host(record: PersonRecord) -> Host {
  Host {
    id:       record.person.id,
    name:     record.person.name,
    slug:     record.person.slug,
    gender:   record.gender,
    pronouns: record.pronouns,
  }
}

// ─── Appearances ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HostAppearances {
  db:      Database,
  utility: SlugUtility,
}

impl HostAppearances {
  pub fn new(db: Database) -> Self {
    let utility = SlugUtility::new(db.clone(), EntityKind::Host);
    Self { db, utility }
  }

  pub fn retrieve_appearances_by_id(&self, id: i64) -> Result<Appearances<HostAppearance>> {
    if !valid_id(&id) {
      return Ok(Appearances::default());
    }

    let count = utility::appearance_count(&self.db, &HOSTS, id)?;

    let mut stmt = self.db.connection().prepare_cached(
      "SELECT s.showid, s.showdate, s.bestof, s.repeatshowid, hm.guest
       FROM ww_showhostmap hm
       JOIN ww_shows s ON s.showid = hm.showid
       WHERE hm.hostid = ?1
       ORDER BY s.showdate ASC",
    )?;
    let rows = stmt
      .query_map(params![id], |row| Ok((RawShowAppearance::from_row(row, 0)?, row.get(4)?)))?
      .collect::<rusqlite::Result<Vec<(RawShowAppearance, bool)>>>()?;

    let shows = rows
      .into_iter()
      .map(|(show, guest)| Ok(HostAppearance { show: show.into_appearance()?, guest }))
      .collect::<Result<Vec<_>>>()?;

    debug!(host_id = id, shows = shows.len(), "retrieved host appearances");
    Ok(Appearances { count, shows })
  }

  pub fn retrieve_appearances_by_slug(&self, slug: &str) -> Result<Appearances<HostAppearance>> {
    self.utility.with_slug(slug, |id| self.retrieve_appearances_by_id(id))
  }
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Host retrieval. Listings skip the `tbd` placeholder host.
#[derive(Clone)]
pub struct Hosts {
  db:          Database,
  utility:     SlugUtility,
  appearances: HostAppearances,
}

impl Hosts {
  pub fn new(db: Database) -> Self {
    Self {
      utility: SlugUtility::new(db.clone(), EntityKind::Host),
      appearances: HostAppearances::new(db.clone()),
      db,
    }
  }

  pub fn appearances(&self) -> &HostAppearances { &self.appearances }

  pub fn retrieve_all(&self) -> Result<Vec<Host>> {
    Ok(utility::all_people(&self.db, &HOSTS)?.into_iter().map(into_host).collect())
  }

  pub fn retrieve_all_details(&self) -> Result<Vec<HostDetails>> {
    self
      .retrieve_all()?
      .into_iter()
      .map(|info| self.details(info))
      .collect()
  }

  pub fn retrieve_all_ids(&self) -> Result<Vec<i64>> {
    utility::all_ids(&self.db, &HOSTS, HOSTS.order_by)
  }

  pub fn retrieve_all_slugs(&self) -> Result<Vec<String>> { utility::all_slugs(&self.db, &HOSTS) }
}

impl SlugAccessor for Hosts {
  type Info = Host;

  fn utility(&self) -> &SlugUtility { &self.utility }

  fn retrieve_by_id(&self, id: i64) -> Result<Option<Host>> {
    Ok(utility::person_by_id(&self.db, &HOSTS, id)?.map(into_host))
  }

  fn slug_of(info: &Host) -> &str { &info.slug }
}

impl DetailsAccessor for Hosts {
  type Details = HostDetails;

  fn details(&self, info: Host) -> Result<HostDetails> {
    let appearances = self.appearances.retrieve_appearances_by_id(info.id)?;
    Ok(HostDetails { info, appearances })
  }
}
