//! [`Database`], the connection handle shared by every accessor.

use std::{
  cell::{Cell, RefCell},
  collections::HashMap,
  hash::Hash,
  path::PathBuf,
  rc::Rc,
};

use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use tracing::debug;
use wwdtm_core::{entity::EntityKind, panelist::ScoreMode};

use crate::{Error, Result, schema::SCHEMA};

/// How to reach the stats database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub path:      PathBuf,
  /// Open without write access. Defaults to `true`.
  #[serde(default = "default_read_only")]
  pub read_only: bool,
}

fn default_read_only() -> bool { true }

impl DatabaseConfig {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), read_only: true }
  }
}

/// A stats database connection.
///
/// Clones share the connection. The handle is not `Send`: queries on one
/// connection must not run concurrently.
#[derive(Clone)]
pub struct Database {
  inner: Rc<Inner>,
}

struct Inner {
  conn:           Connection,
  /// Cached answer to "does `ww_showpnlmap` have a decimal score column".
  decimal_scores: Cell<Option<bool>>,
  lookups:        Lookups,
}

// ─── Lookup memo ─────────────────────────────────────────────────────────────

/// Entries kept per memo table before it is emptied and refilled.
pub const LOOKUP_CAPACITY: usize = 1024;

/// Answers to ID/slug/date resolution queries, misses included.
#[derive(Default)]
pub(crate) struct Lookups {
  pub slug_to_id:   Memo<(EntityKind, String), Option<i64>>,
  pub id_to_slug:   Memo<(EntityKind, i64), Option<String>>,
  pub id_exists:    Memo<(EntityKind, i64), bool>,
  pub date_to_show: Memo<chrono::NaiveDate, Option<i64>>,
}

/// One bounded memo table. Values are cloned out; no borrow outlives a call.
pub(crate) struct Memo<K, V> {
  entries: RefCell<HashMap<K, V>>,
}

impl<K, V> Default for Memo<K, V> {
  fn default() -> Self { Self { entries: RefCell::new(HashMap::new()) } }
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
  /// The cached value for `key`, or the result of `load`, which is cached on
  /// success.
  pub fn get_or_try_insert(&self, key: K, load: impl FnOnce() -> Result<V>) -> Result<V> {
    if let Some(value) = self.entries.borrow().get(&key) {
      return Ok(value.clone());
    }
    let value = load()?;
    let mut entries = self.entries.borrow_mut();
    if entries.len() >= LOOKUP_CAPACITY {
      entries.clear();
    }
    entries.insert(key, value.clone());
    Ok(value)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize { self.entries.borrow().len() }

  fn clear(&self) { self.entries.borrow_mut().clear(); }
}

impl Database {
  /// Open the database described by `config`.
  pub fn open(config: &DatabaseConfig) -> Result<Self> {
    let flags = if config.read_only {
      OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
    } else {
      OpenFlags::default()
    };
    let conn = Connection::open_with_flags(&config.path, flags)?;
    debug!(
      path = %config.path.display(),
      read_only = config.read_only,
      "opened stats database"
    );
    Self::from_connection(conn)
  }

  /// Adopt an already-open connection after checking that it answers.
  pub fn from_connection(conn: Connection) -> Result<Self> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(Self {
      inner: Rc::new(Inner {
        conn,
        decimal_scores: Cell::new(None),
        lookups: Lookups::default(),
      }),
    })
  }

  /// An empty in-memory database with the full schema applied.
  pub fn open_in_memory_with_schema() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Self::from_connection(conn)
  }

  pub fn connection(&self) -> &Connection { &self.inner.conn }

  pub(crate) fn lookups(&self) -> &Lookups { &self.inner.lookups }

  /// Forget every memoized ID, slug and date resolution, and the decimal
  /// column check. Needed only after the underlying data changes.
  pub fn clear_lookups(&self) {
    let lookups = &self.inner.lookups;
    lookups.slug_to_id.clear();
    lookups.id_to_slug.clear();
    lookups.id_exists.clear();
    lookups.date_to_show.clear();
    self.inner.decimal_scores.set(None);
    debug!("cleared lookup memo");
  }

  /// Whether panelist appearances carry a decimal score column.
  pub fn has_decimal_scores(&self) -> Result<bool> {
    if let Some(present) = self.inner.decimal_scores.get() {
      return Ok(present);
    }
    let present: bool = self.connection().query_row(
      "SELECT EXISTS (
         SELECT 1 FROM pragma_table_info('ww_showpnlmap')
         WHERE name = 'panelistscore_decimal'
       )",
      [],
      |row| row.get(0),
    )?;
    self.inner.decimal_scores.set(Some(present));
    Ok(present)
  }

  /// The `ww_showpnlmap` column holding scores for `mode`.
  pub(crate) fn score_column(&self, mode: ScoreMode) -> Result<&'static str> {
    match mode {
      ScoreMode::Integer => Ok("panelistscore"),
      ScoreMode::Decimal if self.has_decimal_scores()? => Ok("panelistscore_decimal"),
      ScoreMode::Decimal => Err(Error::DecimalScoresUnavailable),
    }
  }
}
