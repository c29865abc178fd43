//! Row readers and filtered queries shared by the single and batch show
//! composers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{Row, params_from_iter, types::Value};
use wwdtm_core::{
  panelist::ScoreMode,
  rank::Rank,
  show::{Show, ShowBluff, ShowCoreInfo, ShowGuest, ShowHost, ShowPanelist, ShowScorekeeper},
};

use crate::{
  Database, Result,
  encode::{
    RawNamed, RawOptionalNamed, decode_date, encode_date, non_blank, placeholders, read_score,
  },
  location::{LOCATION_COLUMNS, POSTAL_JOIN, RawLocation},
  panelist::score_expr,
};

/// Which shows a query covers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Filter<'a> {
  All,
  Ids(&'a [i64]),
  /// Shows dated within the inclusive range.
  Dates(NaiveDate, NaiveDate),
}

impl Filter<'_> {
  /// `WHERE` fragment restricting `column`, a show id column.
  fn clause(&self, column: &str) -> String {
    match self {
      Filter::All => "1 = 1".to_owned(),
      Filter::Ids(ids) => format!("{column} IN ({})", placeholders(ids.len())),
      Filter::Dates(..) => format!(
        "{column} IN (SELECT showid FROM ww_shows WHERE showdate BETWEEN ?1 AND ?2)"
      ),
    }
  }

  fn params(&self) -> Vec<Value> {
    match self {
      Filter::All => Vec::new(),
      Filter::Ids(ids) => ids.iter().copied().map(Value::Integer).collect(),
      Filter::Dates(from, to) => vec![Value::Text(encode_date(*from)), Value::Text(encode_date(*to))],
    }
  }
}

fn query<T>(
  db: &Database,
  sql: &str,
  filter: Filter<'_>,
  map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
  let mut stmt = db.connection().prepare_cached(sql)?;
  let rows = stmt
    .query_map(params_from_iter(filter.params()), map)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

// ─── Shows ───────────────────────────────────────────────────────────────────

/// Columns read by [`RawShow::from_row`]; needs [`ORIGINAL_JOIN`].
pub(crate) const SHOW_COLUMNS: &str =
  "s.showid, s.showdate, s.bestof, s.repeatshowid, s.showurl, os.showdate";

/// Resolves a repeat show's original date in the same query.
pub(crate) const ORIGINAL_JOIN: &str = "LEFT JOIN ww_shows os ON os.showid = s.repeatshowid";

pub(crate) struct RawShow {
  pub id:             i64,
  pub date:           String,
  pub best_of:        bool,
  pub repeat_show_id: Option<i64>,
  pub url:            Option<String>,
  pub original_date:  Option<String>,
}

impl RawShow {
  pub fn from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(start)?,
      date:           row.get(start + 1)?,
      best_of:        row.get(start + 2)?,
      repeat_show_id: row.get(start + 3)?,
      url:            row.get(start + 4)?,
      original_date:  row.get(start + 5)?,
    })
  }

  pub fn into_show(self) -> Result<Show> {
    Ok(Show {
      id:                 self.id,
      date:               decode_date(&self.date)?,
      best_of:            self.best_of,
      repeat_show:        self.repeat_show_id.is_some(),
      original_show_id:   self.repeat_show_id,
      original_show_date: self.original_date.as_deref().map(decode_date).transpose()?,
      url:                non_blank(self.url),
    })
  }
}

/// Shows matching `filter`, by date.
pub(crate) fn shows(db: &Database, filter: Filter<'_>) -> Result<Vec<Show>> {
  let sql = format!(
    "SELECT {SHOW_COLUMNS} FROM ww_shows s {ORIGINAL_JOIN}
     WHERE {} ORDER BY s.showdate ASC",
    filter.clause("s.showid"),
  );
  query(db, &sql, filter, |row| RawShow::from_row(row, 0))?
    .into_iter()
    .map(RawShow::into_show)
    .collect()
}

// ─── Core info ───────────────────────────────────────────────────────────────

/// Core records for shows matching `filter`, by date. Shows missing a
/// location, host or scorekeeper assignment are left out.
pub(crate) fn core_info(db: &Database, filter: Filter<'_>) -> Result<Vec<ShowCoreInfo>> {
  let sql = format!(
    "SELECT {SHOW_COLUMNS},
            sd.showdescription, sn.shownotes,
            {LOCATION_COLUMNS},
            h.hostid, h.host, h.hostslug, hm.guest,
            sk.scorekeeperid, sk.scorekeeper, sk.scorekeeperslug, skm.guest, skm.description
     FROM ww_shows s
     {ORIGINAL_JOIN}
     LEFT JOIN ww_showdescriptions sd ON sd.showid = s.showid
     LEFT JOIN ww_shownotes sn ON sn.showid = s.showid
     JOIN ww_showlocationmap lm ON lm.showid = s.showid
     JOIN ww_locations l ON l.locationid = lm.locationid
     {POSTAL_JOIN}
     JOIN ww_showhostmap hm ON hm.showid = s.showid
     JOIN ww_hosts h ON h.hostid = hm.hostid
     JOIN ww_showskmap skm ON skm.showid = s.showid
     JOIN ww_scorekeepers sk ON sk.scorekeeperid = skm.scorekeeperid
     WHERE {}
     ORDER BY s.showdate ASC",
    filter.clause("s.showid"),
  );

  let rows = query(db, &sql, filter, |row| {
    Ok((
      RawShow::from_row(row, 0)?,
      row.get::<_, Option<String>>(6)?,
      row.get::<_, Option<String>>(7)?,
      RawLocation::from_row(row, 8)?,
      (RawNamed::from_row(row, 16)?, row.get::<_, bool>(19)?),
      (
        RawNamed::from_row(row, 20)?,
        row.get::<_, bool>(23)?,
        row.get::<_, Option<String>>(24)?,
      ),
    ))
  })?;

  rows
    .into_iter()
    .map(|(show, description, notes, location, (host, host_guest), (sk, sk_guest, sk_desc))| {
      Ok(ShowCoreInfo {
        show:        show.into_show()?,
        description: non_blank(description),
        notes:       non_blank(notes),
        location:    location.into_location()?,
        host:        ShowHost { person: host.into_person(), guest: host_guest },
        scorekeeper: ShowScorekeeper {
          person:      sk.into_person(),
          guest:       sk_guest,
          description: non_blank(sk_desc),
        },
      })
    })
    .collect()
}

// ─── Participants ────────────────────────────────────────────────────────────

fn group<T>(rows: Vec<(i64, T)>) -> BTreeMap<i64, Vec<T>> {
  let mut grouped: BTreeMap<i64, Vec<T>> = BTreeMap::new();
  for (show_id, item) in rows {
    grouped.entry(show_id).or_default().push(item);
  }
  grouped
}

/// Panelists per show, highest score first, then in entry order.
pub(crate) fn panelists(
  db: &Database,
  filter: Filter<'_>,
  mode: ScoreMode,
) -> Result<BTreeMap<i64, Vec<ShowPanelist>>> {
  let column = db.score_column(mode)?;
  let sql = format!(
    "SELECT pm.showid, p.panelistid, p.panelist, p.panelistslug,
            pm.panelistlrndstart, pm.panelistlrndcorrect, {score} AS score, pm.showpnlrank
     FROM ww_showpnlmap pm
     JOIN ww_panelists p ON p.panelistid = pm.panelistid
     WHERE {}
     ORDER BY pm.showid ASC, score DESC, pm.showpnlmapid ASC",
    filter.clause("pm.showid"),
    score = score_expr(column),
  );
  let rows = query(db, &sql, filter, |row| {
    let rank: Option<String> = row.get(7)?;
    Ok((row.get(0)?, ShowPanelist {
      person:                  RawNamed::from_row(row, 1)?.into_person(),
      lightning_round_start:   row.get(4)?,
      lightning_round_correct: row.get(5)?,
      score:                   read_score(row, 6, mode)?,
      rank:                    Rank::from_column(rank.as_deref()),
    }))
  })?;
  Ok(group(rows))
}

/// Guests per show, in entry order.
pub(crate) fn guests(db: &Database, filter: Filter<'_>) -> Result<BTreeMap<i64, Vec<ShowGuest>>> {
  let sql = format!(
    "SELECT gm.showid, g.guestid, g.guest, g.guestslug, gm.guestscore, gm.exception
     FROM ww_showguestmap gm
     JOIN ww_guests g ON g.guestid = gm.guestid
     WHERE {}
     ORDER BY gm.showid ASC, gm.showguestmapid ASC",
    filter.clause("gm.showid"),
  );
  let rows = query(db, &sql, filter, |row| {
    Ok((row.get(0)?, ShowGuest {
      person:          RawNamed::from_row(row, 1)?.into_person(),
      score:           row.get(4)?,
      score_exception: row.get(5)?,
    }))
  })?;
  Ok(group(rows))
}

/// Bluff the Listener segments per show, by segment.
///
/// The chosen and correct panelists are independent: a segment may know
/// both, either one, or neither.
pub(crate) fn bluffs(db: &Database, filter: Filter<'_>) -> Result<BTreeMap<i64, Vec<ShowBluff>>> {
  let sql = format!(
    "SELECT b.showid, b.segment,
            cp.panelistid, cp.panelist, cp.panelistslug,
            rp.panelistid, rp.panelist, rp.panelistslug
     FROM ww_showbluffmap b
     LEFT JOIN ww_panelists cp ON cp.panelistid = b.chosenbluffpnlid
     LEFT JOIN ww_panelists rp ON rp.panelistid = b.correctbluffpnlid
     WHERE {}
     ORDER BY b.showid ASC, b.segment ASC, b.showbluffmapid ASC",
    filter.clause("b.showid"),
  );
  let rows = query(db, &sql, filter, |row| {
    Ok((row.get(0)?, ShowBluff {
      segment:          row.get(1)?,
      chosen_panelist:  RawOptionalNamed::from_row(row, 2)?.into_person(),
      correct_panelist: RawOptionalNamed::from_row(row, 5)?.into_person(),
    }))
  })?;
  Ok(group(rows))
}
