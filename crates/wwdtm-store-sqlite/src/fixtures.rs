//! A small stats database for tests.
//!
//! Two years of shows: regular, Best Of, repeat and repeat Best Of, plus a
//! placeholder row for every entity kind that has one.

use crate::Database;

pub const SEED: &str = "
INSERT INTO ww_pronouns (pronounsid, pronouns) VALUES
  (1, 'she/her'), (2, 'he/him'), (3, 'they/them');

INSERT INTO ww_postal_abbreviations (postal_abbreviation, name, country) VALUES
  ('IL', 'Illinois', 'United States'),
  ('NY', 'New York', 'United States');

INSERT INTO ww_locations (locationid, city, state, venue, locationslug, latitude, longitude) VALUES
  (1, NULL, NULL, NULL, 'tbd', NULL, NULL),
  (2, 'Chicago', 'IL', 'Chase Auditorium', 'chase-auditorium-chicago-il', '41.8795', '-87.6243'),
  (3, 'New York', 'NY', 'Carnegie Hall', NULL, '40.7651', NULL);

INSERT INTO ww_hosts (hostid, host, hostslug, hostgender) VALUES
  (1, 'Peter Sagal', 'peter-sagal', 'M'),
  (2, 'TBD', 'tbd', NULL);

INSERT INTO ww_hostpronounsmap (hostpronounsmapid, hostid, pronounsid) VALUES (1, 1, 2);

INSERT INTO ww_scorekeepers (scorekeeperid, scorekeeper, scorekeeperslug, scorekeepergender) VALUES
  (1, 'Bill Kurtis', 'bill-kurtis', 'M'),
  (2, 'Carl Kasell', '', 'M'),
  (3, 'TBD', 'tbd', NULL);

INSERT INTO ww_panelists (panelistid, panelist, panelistslug, panelistgender) VALUES
  (1, 'Paula Poundstone', 'paula-poundstone', 'F'),
  (2, 'Mo Rocca', 'mo-rocca', 'M'),
  (3, 'Faith Salie', 'faith-salie', 'F'),
  (4, 'Multiple', 'multiple', NULL),
  (5, 'Adam Felber', NULL, 'M');

INSERT INTO ww_panelistpronounsmap (panelistpronounsmapid, panelistid, pronounsid) VALUES
  (1, 1, 1), (2, 1, 3), (3, 2, 2), (4, 3, 1);

INSERT INTO ww_guests (guestid, guest, guestslug) VALUES
  (1, 'Tom Hanks', 'tom-hanks'),
  (2, 'None', 'none'),
  (3, 'Julia Louis-Dreyfus', NULL);

INSERT INTO ww_shows (showid, showdate, repeatshowid, bestof, showurl) VALUES
  (1, '2018-10-20', NULL, 0, 'https://example.org/2018-10-20'),
  (2, '2018-10-27', NULL, 0, NULL),
  (3, '2018-12-29', NULL, 1, NULL),
  (4, '2019-01-05', 2, 0, NULL),
  (5, '2019-02-02', NULL, 0, '  '),
  (6, '2019-06-01', 3, 1, NULL);

INSERT INTO ww_showdescriptions (showdescriptionid, showid, showdescription) VALUES
  (1, 2, 'Live from Chicago.');

INSERT INTO ww_shownotes (shownotesid, showid, shownotes) VALUES
  (1, 1, 'Taped early.'),
  (2, 2, '   ');

INSERT INTO ww_showlocationmap (showlocationmapid, showid, locationid) VALUES
  (1, 1, 2), (2, 2, 2), (3, 3, 2), (4, 4, 2), (5, 5, 3), (6, 6, 2);

INSERT INTO ww_showhostmap (showhostmapid, showid, hostid, guest) VALUES
  (1, 1, 1, 0), (2, 2, 1, 0), (3, 3, 1, 0), (4, 4, 1, 0), (5, 5, 1, 0), (6, 6, 1, 0);

INSERT INTO ww_showskmap (showskmapid, showid, scorekeeperid, guest, description) VALUES
  (1, 1, 1, 0, NULL),
  (2, 2, 1, 0, NULL),
  (3, 3, 1, 0, NULL),
  (4, 4, 1, 0, NULL),
  (5, 5, 2, 1, 'Guest scorekeeper'),
  (6, 6, 1, 0, NULL);

INSERT INTO ww_showpnlmap
  (showpnlmapid, showid, panelistid, panelistlrndstart, panelistlrndcorrect,
   panelistscore, panelistscore_decimal, showpnlrank)
VALUES
  (1,  1, 1, 3, 2, 10, '10',   '2'),
  (2,  1, 2, 4, 3, 12, '12',   '1'),
  (3,  1, 3, 2, 0, 6,  '6',    '3'),
  (4,  2, 1, 4, 4, 16, '16.5', '1'),
  (5,  2, 2, 2, 1, 8,  '8',    '3'),
  (6,  2, 3, 3, 2, 12, '12',   '2'),
  (7,  3, 1, NULL, NULL, 20, '20', '1'),
  (8,  3, 2, NULL, NULL, 5,  '5',  '3'),
  (9,  3, 3, NULL, NULL, 7,  '7',  '2'),
  (10, 4, 1, 4, 4, 16, '16.5', '1'),
  (11, 4, 2, 2, 1, 8,  '8',    '3'),
  (12, 4, 3, 3, 2, 12, '12',   '2'),
  (13, 5, 1, NULL, NULL, NULL, NULL, ''),
  (14, 5, 2, 3, 3, 10, '10',   '1t'),
  (15, 5, 3, 3, 3, 10, '10',   '1t'),
  (16, 6, 1, NULL, NULL, 20, '20', '1'),
  (17, 6, 2, NULL, NULL, 5,  '5',  '3'),
  (18, 6, 3, NULL, NULL, 7,  '7',  '2');

INSERT INTO ww_showguestmap (showguestmapid, showid, guestid, guestscore, exception) VALUES
  (1, 1, 1, 2, 0),
  (2, 2, 3, 3, 1),
  (3, 2, 1, 1, 0),
  (4, 4, 1, 1, 0),
  (5, 3, 2, NULL, 0);

INSERT INTO ww_showbluffmap (showbluffmapid, showid, segment, chosenbluffpnlid, correctbluffpnlid) VALUES
  (1, 1, 1, 1, 2),
  (2, 2, 1, 2, NULL),
  (3, 2, 2, NULL, 3),
  (4, 5, 1, NULL, NULL),
  (5, 4, 1, 2, NULL),
  (6, 3, 1, 1, 1);
";

/// In-memory database with the schema and [`SEED`] applied.
pub fn seeded() -> Database {
  let db = Database::open_in_memory_with_schema().expect("in-memory database");
  db.connection().execute_batch(SEED).expect("seed data");
  db
}
