//! SQL schema for the stats database.
//!
//! The store only ever reads. This DDL describes the tables it reads from and
//! is used to build empty databases for tests and local tooling.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS ww_shows (
    showid        INTEGER PRIMARY KEY,
    showdate      TEXT    NOT NULL UNIQUE,   -- YYYY-MM-DD
    repeatshowid  INTEGER REFERENCES ww_shows(showid),
    bestof        INTEGER NOT NULL DEFAULT 0,
    showurl       TEXT
);

CREATE TABLE IF NOT EXISTS ww_showdescriptions (
    showdescriptionid INTEGER PRIMARY KEY,
    showid            INTEGER NOT NULL UNIQUE REFERENCES ww_shows(showid),
    showdescription   TEXT
);

CREATE TABLE IF NOT EXISTS ww_shownotes (
    shownotesid INTEGER PRIMARY KEY,
    showid      INTEGER NOT NULL UNIQUE REFERENCES ww_shows(showid),
    shownotes   TEXT
);

CREATE TABLE IF NOT EXISTS ww_pronouns (
    pronounsid INTEGER PRIMARY KEY,
    pronouns   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ww_postal_abbreviations (
    postal_abbreviation TEXT PRIMARY KEY,
    name                TEXT NOT NULL,
    country             TEXT
);

-- Entities. Each slug column may be NULL or empty on older rows.

CREATE TABLE IF NOT EXISTS ww_locations (
    locationid   INTEGER PRIMARY KEY,
    city         TEXT,
    state        TEXT,   -- postal abbreviation
    venue        TEXT,
    locationslug TEXT,
    latitude     TEXT,
    longitude    TEXT
);

CREATE TABLE IF NOT EXISTS ww_hosts (
    hostid     INTEGER PRIMARY KEY,
    host       TEXT NOT NULL,
    hostslug   TEXT,
    hostgender TEXT
);

CREATE TABLE IF NOT EXISTS ww_scorekeepers (
    scorekeeperid     INTEGER PRIMARY KEY,
    scorekeeper       TEXT NOT NULL,
    scorekeeperslug   TEXT,
    scorekeepergender TEXT
);

CREATE TABLE IF NOT EXISTS ww_panelists (
    panelistid     INTEGER PRIMARY KEY,
    panelist       TEXT NOT NULL,
    panelistslug   TEXT,
    panelistgender TEXT
);

CREATE TABLE IF NOT EXISTS ww_guests (
    guestid   INTEGER PRIMARY KEY,
    guest     TEXT NOT NULL,
    guestslug TEXT
);

-- Pronoun assignments, ordered by map id.

CREATE TABLE IF NOT EXISTS ww_hostpronounsmap (
    hostpronounsmapid INTEGER PRIMARY KEY,
    hostid            INTEGER NOT NULL REFERENCES ww_hosts(hostid),
    pronounsid        INTEGER NOT NULL REFERENCES ww_pronouns(pronounsid)
);

CREATE TABLE IF NOT EXISTS ww_scorekeeperpronounsmap (
    scorekeeperpronounsmapid INTEGER PRIMARY KEY,
    scorekeeperid            INTEGER NOT NULL REFERENCES ww_scorekeepers(scorekeeperid),
    pronounsid               INTEGER NOT NULL REFERENCES ww_pronouns(pronounsid)
);

CREATE TABLE IF NOT EXISTS ww_panelistpronounsmap (
    panelistpronounsmapid INTEGER PRIMARY KEY,
    panelistid            INTEGER NOT NULL REFERENCES ww_panelists(panelistid),
    pronounsid            INTEGER NOT NULL REFERENCES ww_pronouns(pronounsid)
);

-- Per-show participation.

CREATE TABLE IF NOT EXISTS ww_showlocationmap (
    showlocationmapid INTEGER PRIMARY KEY,
    showid            INTEGER NOT NULL REFERENCES ww_shows(showid),
    locationid        INTEGER NOT NULL REFERENCES ww_locations(locationid)
);

CREATE TABLE IF NOT EXISTS ww_showhostmap (
    showhostmapid INTEGER PRIMARY KEY,
    showid        INTEGER NOT NULL REFERENCES ww_shows(showid),
    hostid        INTEGER NOT NULL REFERENCES ww_hosts(hostid),
    guest         INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS ww_showskmap (
    showskmapid   INTEGER PRIMARY KEY,
    showid        INTEGER NOT NULL REFERENCES ww_shows(showid),
    scorekeeperid INTEGER NOT NULL REFERENCES ww_scorekeepers(scorekeeperid),
    guest         INTEGER NOT NULL DEFAULT 0,
    description   TEXT
);

CREATE TABLE IF NOT EXISTS ww_showpnlmap (
    showpnlmapid          INTEGER PRIMARY KEY,
    showid                INTEGER NOT NULL REFERENCES ww_shows(showid),
    panelistid            INTEGER NOT NULL REFERENCES ww_panelists(panelistid),
    panelistlrndstart     INTEGER,
    panelistlrndcorrect   INTEGER,
    panelistscore         INTEGER,
    panelistscore_decimal TEXT,
    showpnlrank           TEXT    -- '1' | '1t' | '2' | '2t' | '3'
);

CREATE TABLE IF NOT EXISTS ww_showguestmap (
    showguestmapid INTEGER PRIMARY KEY,
    showid         INTEGER NOT NULL REFERENCES ww_shows(showid),
    guestid        INTEGER NOT NULL REFERENCES ww_guests(guestid),
    guestscore     INTEGER,
    exception      INTEGER NOT NULL DEFAULT 0
);

-- Either panelist reference may be NULL.
CREATE TABLE IF NOT EXISTS ww_showbluffmap (
    showbluffmapid    INTEGER PRIMARY KEY,
    showid            INTEGER NOT NULL REFERENCES ww_shows(showid),
    segment           INTEGER NOT NULL DEFAULT 1,
    chosenbluffpnlid  INTEGER REFERENCES ww_panelists(panelistid),
    correctbluffpnlid INTEGER REFERENCES ww_panelists(panelistid)
);

CREATE INDEX IF NOT EXISTS showpnlmap_panelist_idx ON ww_showpnlmap(panelistid);
CREATE INDEX IF NOT EXISTS showpnlmap_show_idx     ON ww_showpnlmap(showid);
CREATE INDEX IF NOT EXISTS showguestmap_guest_idx  ON ww_showguestmap(guestid);
CREATE INDEX IF NOT EXISTS showguestmap_show_idx   ON ww_showguestmap(showid);
CREATE INDEX IF NOT EXISTS showbluffmap_show_idx   ON ww_showbluffmap(showid);

PRAGMA user_version = 1;
";
