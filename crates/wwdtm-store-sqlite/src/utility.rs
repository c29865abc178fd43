//! ID and slug resolution shared by every slug-addressable entity.
//!
//! Table and column names come from the fixed [`Table`] descriptions below,
//! never from callers; values are always bound as parameters.

use rusqlite::{OptionalExtension as _, params};
use tracing::trace;
use wwdtm_core::{
  appearance::AppearanceCount,
  entity::{EntityKind, PersonRef},
  slug::{LocationParts, Slugged as _, slugify_location},
  valid_id,
};

use crate::{
  Database, Result,
  encode::{RawNamed, non_blank},
};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Where one entity kind lives.
pub(crate) struct Table {
  pub kind:     EntityKind,
  pub name:     &'static str,
  pub id:       &'static str,
  pub label:    &'static str,
  pub slug:     &'static str,
  pub gender:   Option<&'static str>,
  /// Listing order.
  pub order_by: &'static str,
  /// Per-show map table and the column that points back at this entity.
  pub show_map: (&'static str, &'static str),
  /// Pronoun map table and its key, for people with pronouns.
  pub pronouns: Option<(&'static str, &'static str)>,
}

impl Table {
  /// `WHERE` fragment excluding the placeholder row. Binds nothing.
  pub fn not_placeholder(&self) -> String {
    format!(
      "({slug} IS NULL OR {slug} != '{placeholder}')",
      slug = self.slug,
      placeholder = self.kind.placeholder().slug()
    )
  }
}

pub(crate) const GUESTS: Table = Table {
  kind:     EntityKind::Guest,
  name:     "ww_guests",
  id:       "guestid",
  label:    "guest",
  slug:     "guestslug",
  gender:   None,
  order_by: "guest ASC",
  show_map: ("ww_showguestmap", "guestid"),
  pronouns: None,
};

pub(crate) const HOSTS: Table = Table {
  kind:     EntityKind::Host,
  name:     "ww_hosts",
  id:       "hostid",
  label:    "host",
  slug:     "hostslug",
  gender:   Some("hostgender"),
  order_by: "host ASC",
  show_map: ("ww_showhostmap", "hostid"),
  pronouns: Some(("ww_hostpronounsmap", "hostpronounsmapid")),
};

pub(crate) const LOCATIONS: Table = Table {
  kind:     EntityKind::Location,
  name:     "ww_locations",
  id:       "locationid",
  label:    "venue",
  slug:     "locationslug",
  gender:   None,
  order_by: "state ASC, city ASC, venue ASC",
  show_map: ("ww_showlocationmap", "locationid"),
  pronouns: None,
};

pub(crate) const PANELISTS: Table = Table {
  kind:     EntityKind::Panelist,
  name:     "ww_panelists",
  id:       "panelistid",
  label:    "panelist",
  slug:     "panelistslug",
  gender:   Some("panelistgender"),
  order_by: "panelist ASC",
  show_map: ("ww_showpnlmap", "panelistid"),
  pronouns: Some(("ww_panelistpronounsmap", "panelistpronounsmapid")),
};

pub(crate) const SCOREKEEPERS: Table = Table {
  kind:     EntityKind::Scorekeeper,
  name:     "ww_scorekeepers",
  id:       "scorekeeperid",
  label:    "scorekeeper",
  slug:     "scorekeeperslug",
  gender:   Some("scorekeepergender"),
  order_by: "scorekeeper ASC",
  show_map: ("ww_showskmap", "scorekeeperid"),
  pronouns: Some(("ww_scorekeeperpronounsmap", "scorekeeperpronounsmapid")),
};

pub(crate) fn table(kind: EntityKind) -> &'static Table {
  match kind {
    EntityKind::Guest => &GUESTS,
    EntityKind::Host => &HOSTS,
    EntityKind::Location => &LOCATIONS,
    EntityKind::Panelist => &PANELISTS,
    EntityKind::Scorekeeper => &SCOREKEEPERS,
  }
}

// ─── Slug utility ────────────────────────────────────────────────────────────

/// Bidirectional ID/slug lookup and existence checks against one table.
///
/// Lookups are exact and case-sensitive. Invalid IDs and blank slugs answer
/// `None` or `false` without touching the database. Answers, misses
/// included, are memoized on the shared [`Database`] handle.
///
/// A slug resolves against the stored column first. Rows without a stored
/// slug are listed under a derived one, so an unmatched slug is then compared
/// against the derived slugs of exactly those rows.
#[derive(Clone)]
pub struct SlugUtility {
  db:    Database,
  table: &'static Table,
}

impl SlugUtility {
  pub fn new(db: Database, kind: EntityKind) -> Self { Self { db, table: table(kind) } }

  pub fn kind(&self) -> EntityKind { self.table.kind }

  /// The stored slug for `id`. Rows without a stored slug answer `None`.
  pub fn convert_id_to_slug(&self, id: i64) -> Result<Option<String>> {
    if !valid_id(&id) {
      trace!(kind = ?self.table.kind, id, "invalid id");
      return Ok(None);
    }
    let t = self.table;
    self.db.lookups().id_to_slug.get_or_try_insert((t.kind, id), || {
      let sql = format!("SELECT {} FROM {} WHERE {} = ?1 LIMIT 1", t.slug, t.name, t.id);
      let slug: Option<Option<String>> = self
        .db
        .connection()
        .prepare_cached(&sql)?
        .query_row(params![id], |row| row.get(0))
        .optional()?;
      Ok(non_blank(slug.flatten()))
    })
  }

  /// The id a stored or derived slug belongs to.
  pub fn convert_slug_to_id(&self, slug: &str) -> Result<Option<i64>> {
    let slug = slug.trim();
    if slug.is_empty() {
      trace!(kind = ?self.table.kind, "blank slug");
      return Ok(None);
    }
    let t = self.table;
    self.db.lookups().slug_to_id.get_or_try_insert((t.kind, slug.to_owned()), || {
      let sql = format!("SELECT {} FROM {} WHERE {} = ?1 LIMIT 1", t.id, t.name, t.slug);
      let stored: Option<i64> = self
        .db
        .connection()
        .prepare_cached(&sql)?
        .query_row(params![slug], |row| row.get(0))
        .optional()?;
      match stored {
        Some(id) => Ok(Some(id)),
        None => self.derived_slug_to_id(slug),
      }
    })
  }

  pub fn id_exists(&self, id: i64) -> Result<bool> {
    if !valid_id(&id) {
      return Ok(false);
    }
    let t = self.table;
    self.db.lookups().id_exists.get_or_try_insert((t.kind, id), || {
      let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE {} = ?1)", t.name, t.id);
      Ok(
        self
          .db
          .connection()
          .prepare_cached(&sql)?
          .query_row(params![id], |row| row.get(0))?,
      )
    })
  }

  pub fn slug_exists(&self, slug: &str) -> Result<bool> {
    Ok(self.convert_slug_to_id(slug)?.is_some())
  }

  /// A uniformly random id, skipping the placeholder row. Never memoized.
  pub fn random_id(&self) -> Result<Option<i64>> {
    let t = self.table;
    let sql = format!(
      "SELECT {} FROM {} WHERE {} ORDER BY RANDOM() LIMIT 1",
      t.id,
      t.name,
      t.not_placeholder()
    );
    Ok(
      self
        .db
        .connection()
        .prepare_cached(&sql)?
        .query_row([], |row| row.get(0))
        .optional()?,
    )
  }

  /// Resolve `slug` and hand its id to `by_id`. Unknown slugs answer
  /// `T::default()` without calling it.
  pub(crate) fn with_slug<T: Default>(
    &self,
    slug: &str,
    by_id: impl FnOnce(i64) -> Result<T>,
  ) -> Result<T> {
    match self.convert_slug_to_id(slug)? {
      Some(id) => by_id(id),
      None => Ok(T::default()),
    }
  }

  /// Match `slug` against the derived slugs of rows with no stored slug.
  fn derived_slug_to_id(&self, slug: &str) -> Result<Option<i64>> {
    let t = self.table;
    let conn = self.db.connection();

    let found = if t.kind == EntityKind::Location {
      let mut stmt = conn.prepare_cached(
        "SELECT locationid, venue, city, state, locationslug
         FROM ww_locations ORDER BY locationid ASC",
      )?;
      let rows = stmt
        .query_map([], |row| {
          Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
          ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      rows
        .into_iter()
        .filter(|row| row.4.as_deref().map(str::trim).is_none_or(str::is_empty))
        .find_map(|(id, venue, city, state, _)| {
          let derived = slugify_location(LocationParts {
            id:    Some(id),
            venue: venue.as_deref(),
            city:  city.as_deref(),
            state: state.as_deref(),
          })
          .ok()?;
          (derived == slug).then_some(id)
        })
    } else {
      let sql = format!(
        "SELECT {}, {}, {} FROM {} ORDER BY {} ASC",
        t.id, t.label, t.slug, t.name, t.id
      );
      let mut stmt = conn.prepare_cached(&sql)?;
      let rows = stmt
        .query_map([], |row| RawNamed::from_row(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      rows
        .into_iter()
        .filter(|raw| raw.stored_slug().is_none())
        .find(|raw| raw.effective_slug() == slug)
        .map(|raw| raw.id)
    };

    if let Some(id) = found {
      trace!(kind = ?t.kind, id, slug, "resolved derived slug");
    }
    Ok(found)
  }
}

// ─── Shared queries ──────────────────────────────────────────────────────────

/// Regular and total appearance counts for `id` in `table`'s show map.
pub(crate) fn appearance_count(db: &Database, table: &Table, id: i64) -> Result<AppearanceCount> {
  let (map, column) = table.show_map;
  let sql = format!(
    "SELECT
       (SELECT COUNT(m.showid) FROM {map} m
        JOIN ww_shows s ON s.showid = m.showid
        WHERE m.{column} = ?1 AND s.bestof = 0 AND s.repeatshowid IS NULL),
       (SELECT COUNT(m.showid) FROM {map} m
        JOIN ww_shows s ON s.showid = m.showid
        WHERE m.{column} = ?1)"
  );
  Ok(
    db.connection()
      .prepare_cached(&sql)?
      .query_row(params![id], |row| {
        Ok(AppearanceCount { regular_shows: row.get(0)?, all_shows: row.get(1)? })
      })?,
  )
}

/// Pronouns assigned to `id`, in assignment order.
pub(crate) fn pronouns(db: &Database, table: &Table, id: i64) -> Result<Vec<String>> {
  let Some((map, key)) = table.pronouns else {
    return Ok(Vec::new());
  };
  let sql = format!(
    "SELECT p.pronouns FROM {map} pm
     JOIN ww_pronouns p ON p.pronounsid = pm.pronounsid
     WHERE pm.{id} = ?1
     ORDER BY pm.{key} ASC",
    id = table.id,
  );
  let mut stmt = db.connection().prepare_cached(&sql)?;
  let rows = stmt
    .query_map(params![id], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(rows)
}

/// Ids of every non-placeholder row, in listing order.
pub(crate) fn all_ids(db: &Database, table: &Table, order_by: &str) -> Result<Vec<i64>> {
  let sql = format!(
    "SELECT {} FROM {} WHERE {} ORDER BY {}",
    table.id,
    table.name,
    table.not_placeholder(),
    order_by
  );
  let mut stmt = db.connection().prepare_cached(&sql)?;
  let ids = stmt
    .query_map([], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<i64>>>()?;
  Ok(ids)
}

// ─── People ──────────────────────────────────────────────────────────────────

/// A guest, host, panelist or scorekeeper row with the slug fallback applied.
pub(crate) struct PersonRecord {
  pub person:   PersonRef,
  pub gender:   Option<String>,
  pub pronouns: Vec<String>,
}

fn person_columns(table: &Table) -> String {
  format!(
    "{}, {}, {}, {}",
    table.id,
    table.label,
    table.slug,
    table.gender.unwrap_or("NULL")
  )
}

fn read_people(db: &Database, table: &Table, sql: &str, id: Option<i64>) -> Result<Vec<PersonRecord>> {
  let mut stmt = db.connection().prepare_cached(sql)?;
  let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(RawNamed, Option<String>)> {
    Ok((RawNamed::from_row(row, 0)?, row.get(3)?))
  };
  let rows = match id {
    Some(id) => stmt.query_map(params![id], map_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
    None => stmt.query_map([], map_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
  };

  rows
    .into_iter()
    .map(|(raw, gender)| {
      let pronouns = pronouns(db, table, raw.id)?;
      Ok(PersonRecord { person: raw.into_person(), gender, pronouns })
    })
    .collect()
}

/// Every non-placeholder person in `table`, ordered by name.
pub(crate) fn all_people(db: &Database, table: &Table) -> Result<Vec<PersonRecord>> {
  let sql = format!(
    "SELECT {} FROM {} WHERE {} ORDER BY {}",
    person_columns(table),
    table.name,
    table.not_placeholder(),
    table.order_by
  );
  read_people(db, table, &sql, None)
}

/// One person by id. Invalid ids answer `None` without a query.
pub(crate) fn person_by_id(db: &Database, table: &Table, id: i64) -> Result<Option<PersonRecord>> {
  if !valid_id(&id) {
    return Ok(None);
  }
  let sql = format!(
    "SELECT {} FROM {} WHERE {} = ?1 LIMIT 1",
    person_columns(table),
    table.name,
    table.id
  );
  Ok(read_people(db, table, &sql, Some(id))?.pop())
}

/// Effective slugs of every non-placeholder person, ordered by name.
pub(crate) fn all_slugs(db: &Database, table: &Table) -> Result<Vec<String>> {
  let sql = format!(
    "SELECT {}, {}, {} FROM {} WHERE {} ORDER BY {}",
    table.id,
    table.label,
    table.slug,
    table.name,
    table.not_placeholder(),
    table.order_by
  );
  let mut stmt = db.connection().prepare_cached(&sql)?;
  let slugs = stmt
    .query_map([], |row| RawNamed::from_row(row, 0))?
    .map(|raw| raw.map(|r| r.into_person().slug))
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(slugs)
}
