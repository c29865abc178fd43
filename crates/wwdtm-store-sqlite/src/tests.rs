//! Integration tests for the accessors against the seeded in-memory database.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use wwdtm_core::{
  entity::EntityKind,
  location::LocationSort,
  panelist::{BluffCounts, Score, ScoreMode},
  rank::{Rank, RankCounts},
  show::ShowCounts,
};

use crate::{
  Database, DetailsAccessor as _, Error, Guests, Hosts, Locations, PanelistAppearances,
  PanelistDecimalScores, PanelistScores, PanelistStatistics, Panelists, Pronouns,
  SlugAccessor as _, Scorekeepers, ShowInfo, ShowInfoMultiple, ShowUtility, Shows, SlugUtility,
  fixtures::seeded,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Slug utility ────────────────────────────────────────────────────────────

#[test]
fn guest_slug_lookup() {
  let guests = SlugUtility::new(seeded(), EntityKind::Guest);
  assert_eq!(guests.convert_slug_to_id("tom-hanks").unwrap(), Some(1));
  assert_eq!(guests.convert_slug_to_id("tom-hanx").unwrap(), None);
  assert_eq!(guests.convert_slug_to_id("   ").unwrap(), None);
  assert!(guests.slug_exists(" tom-hanks ").unwrap());
  assert!(!guests.slug_exists("TOM-HANKS").unwrap());
}

#[test]
fn slug_round_trip_for_stored_slugs() {
  let db = seeded();
  for kind in [EntityKind::Guest, EntityKind::Host, EntityKind::Panelist, EntityKind::Scorekeeper] {
    let utility = SlugUtility::new(db.clone(), kind);
    for id in 1..=5 {
      if let Some(slug) = utility.convert_id_to_slug(id).unwrap() {
        assert_eq!(utility.convert_slug_to_id(&slug).unwrap(), Some(id), "{kind:?} {id}");
      }
    }
  }
}

#[test]
fn missing_slugs_are_not_stored_slugs() {
  let db = seeded();
  let guests = SlugUtility::new(db.clone(), EntityKind::Guest);
  assert_eq!(guests.convert_id_to_slug(3).unwrap(), None);
  let scorekeepers = SlugUtility::new(db, EntityKind::Scorekeeper);
  assert_eq!(scorekeepers.convert_id_to_slug(2).unwrap(), None);
}

#[test]
fn invalid_ids_short_circuit() {
  let utility = SlugUtility::new(seeded(), EntityKind::Host);
  assert_eq!(utility.convert_id_to_slug(-1).unwrap(), None);
  assert_eq!(utility.convert_id_to_slug(1 << 31).unwrap(), None);
  assert!(!utility.id_exists(-54).unwrap());
  assert!(utility.id_exists(1).unwrap());
  assert!(!utility.id_exists(99).unwrap());
}

#[test]
fn random_ids_skip_placeholders() {
  let db = seeded();
  let panelists = SlugUtility::new(db.clone(), EntityKind::Panelist);
  let hosts = SlugUtility::new(db, EntityKind::Host);
  for _ in 0..25 {
    assert_ne!(panelists.random_id().unwrap(), Some(4));
    assert_eq!(hosts.random_id().unwrap(), Some(1));
  }
}

#[test]
fn random_slugs_resolve_back() {
  let db = seeded();
  let hosts = Hosts::new(db.clone());
  assert_eq!(hosts.retrieve_random_slug().unwrap().as_deref(), Some("peter-sagal"));
  assert_eq!(hosts.retrieve_random_details().unwrap().map(|d| d.info.id), Some(1));

  let panelists = Panelists::new(db);
  for _ in 0..10 {
    let slug = panelists.retrieve_random_slug().unwrap().unwrap();
    assert_ne!(slug, "multiple");
    assert!(panelists.retrieve_by_slug(&slug).unwrap().is_some(), "{slug}");
  }
}

#[test]
fn derived_slugs_resolve_to_their_rows() {
  let db = seeded();
  let guests = SlugUtility::new(db.clone(), EntityKind::Guest);
  assert_eq!(guests.convert_slug_to_id("julia-louis-dreyfus").unwrap(), Some(3));
  assert!(guests.slug_exists("julia-louis-dreyfus").unwrap());
  assert_eq!(guests.convert_id_to_slug(3).unwrap(), None);

  let scorekeepers = SlugUtility::new(db.clone(), EntityKind::Scorekeeper);
  assert_eq!(scorekeepers.convert_slug_to_id("carl-kasell").unwrap(), Some(2));

  let locations = SlugUtility::new(db.clone(), EntityKind::Location);
  assert_eq!(locations.convert_slug_to_id("carnegie-hall-new-york-ny").unwrap(), Some(3));

  // Rows with a stored slug are never matched by their name.
  let hosts = SlugUtility::new(db, EntityKind::Host);
  assert_eq!(hosts.convert_slug_to_id("peter-sagal").unwrap(), Some(1));
  assert_eq!(hosts.convert_slug_to_id("tbd").unwrap(), Some(2));
  let panelists = SlugUtility::new(seeded(), EntityKind::Panelist);
  assert_eq!(panelists.convert_slug_to_id("adam-felber").unwrap(), Some(5));
}

#[test]
fn every_listed_slug_resolves_to_its_id() {
  let db = seeded();

  let guests = Guests::new(db.clone());
  let pairs = guests
    .retrieve_all_slugs()
    .unwrap()
    .into_iter()
    .zip(guests.retrieve_all_ids().unwrap());
  for (slug, id) in pairs {
    assert_eq!(guests.retrieve_by_slug(&slug).unwrap().map(|g| g.id), Some(id), "{slug}");
  }

  let hosts = Hosts::new(db.clone());
  let pairs = hosts
    .retrieve_all_slugs()
    .unwrap()
    .into_iter()
    .zip(hosts.retrieve_all_ids().unwrap());
  for (slug, id) in pairs {
    assert_eq!(hosts.retrieve_by_slug(&slug).unwrap().map(|h| h.id), Some(id), "{slug}");
  }

  let scorekeepers = Scorekeepers::new(db.clone());
  let pairs = scorekeepers
    .retrieve_all_slugs()
    .unwrap()
    .into_iter()
    .zip(scorekeepers.retrieve_all_ids().unwrap());
  for (slug, id) in pairs {
    assert_eq!(scorekeepers.retrieve_by_slug(&slug).unwrap().map(|s| s.id), Some(id), "{slug}");
  }

  let panelists = Panelists::new(db.clone());
  let pairs = panelists
    .retrieve_all_slugs()
    .unwrap()
    .into_iter()
    .zip(panelists.retrieve_all_ids().unwrap());
  for (slug, id) in pairs {
    assert_eq!(panelists.retrieve_by_slug(&slug).unwrap().map(|p| p.id), Some(id), "{slug}");
  }

  let locations = Locations::new(db);
  for sort in [LocationSort::State, LocationSort::Venue] {
    let pairs = locations
      .retrieve_all_slugs(sort)
      .unwrap()
      .into_iter()
      .zip(locations.retrieve_all_ids(sort).unwrap());
    for (slug, id) in pairs {
      assert_eq!(locations.retrieve_by_slug(&slug).unwrap().map(|l| l.id), Some(id), "{slug}");
    }
  }
}

#[test]
fn fallback_slug_details_and_appearances() {
  let db = seeded();
  let guests = Guests::new(db.clone());
  let julia = guests.retrieve_details_by_slug("julia-louis-dreyfus").unwrap().unwrap();
  assert_eq!(julia.info.id, 3);
  assert_eq!(
    guests.appearances().retrieve_appearances_by_slug("julia-louis-dreyfus").unwrap().count,
    julia.appearances.count
  );

  let recordings = Locations::new(db)
    .recordings()
    .retrieve_recordings_by_slug("carnegie-hall-new-york-ny")
    .unwrap();
  assert_eq!(recordings.shows.len(), 1);
}

// ─── Lookup memo ─────────────────────────────────────────────────────────────

#[test]
fn repeated_slug_lookups_are_answered_from_memo() {
  let db = seeded();
  let guests = SlugUtility::new(db.clone(), EntityKind::Guest);
  assert_eq!(guests.convert_slug_to_id("tom-hanks").unwrap(), Some(1));
  assert_eq!(guests.convert_slug_to_id("thomas-hanks").unwrap(), None);
  assert_eq!(guests.convert_id_to_slug(1).unwrap().as_deref(), Some("tom-hanks"));
  assert!(!guests.id_exists(42).unwrap());

  db.connection()
    .execute_batch(
      "UPDATE ww_guests SET guestslug = 'thomas-hanks' WHERE guestid = 1;
       INSERT INTO ww_guests (guestid, guest, guestslug) VALUES (42, 'Someone', 'someone');",
    )
    .unwrap();

  // Answers, misses included, come from the memo and skip the changed rows.
  assert_eq!(guests.convert_slug_to_id("tom-hanks").unwrap(), Some(1));
  assert_eq!(guests.convert_slug_to_id("thomas-hanks").unwrap(), None);
  assert_eq!(guests.convert_id_to_slug(1).unwrap().as_deref(), Some("tom-hanks"));
  assert!(!guests.id_exists(42).unwrap());
  assert_eq!(db.lookups().slug_to_id.len(), 2);

  // A second utility over the same handle shares the memo.
  let again = Guests::new(db.clone());
  assert_eq!(again.utility().convert_slug_to_id("tom-hanks").unwrap(), Some(1));

  db.clear_lookups();
  assert_eq!(db.lookups().slug_to_id.len(), 0);
  assert_eq!(guests.convert_slug_to_id("tom-hanks").unwrap(), None);
  assert_eq!(guests.convert_slug_to_id("thomas-hanks").unwrap(), Some(1));
  assert!(guests.id_exists(42).unwrap());
}

#[test]
fn memo_is_per_entity_kind() {
  let db = seeded();
  let hosts = SlugUtility::new(db.clone(), EntityKind::Host);
  let scorekeepers = SlugUtility::new(db, EntityKind::Scorekeeper);
  assert_eq!(hosts.convert_slug_to_id("tbd").unwrap(), Some(2));
  assert_eq!(scorekeepers.convert_slug_to_id("tbd").unwrap(), Some(3));
}

#[test]
fn show_date_lookups_are_answered_from_memo() {
  let db = seeded();
  let utility = ShowUtility::new(db.clone());
  assert_eq!(utility.convert_date_to_id(2018, 10, 20).unwrap(), Some(1));

  db.connection()
    .execute("UPDATE ww_shows SET showdate = '2018-10-21' WHERE showid = 1", [])
    .unwrap();
  assert_eq!(utility.convert_date_to_id(2018, 10, 20).unwrap(), Some(1));

  db.clear_lookups();
  assert_eq!(utility.convert_date_to_id(2018, 10, 20).unwrap(), None);
  assert_eq!(utility.convert_date_to_id(2018, 10, 21).unwrap(), Some(1));
}

// ─── Guests, hosts, scorekeepers ─────────────────────────────────────────────

#[test]
fn guest_by_slug_and_details() {
  let guests = Guests::new(seeded());

  let guest = guests.retrieve_by_slug("tom-hanks").unwrap().unwrap();
  assert_eq!(guest.name, "Tom Hanks");

  let details = guests.retrieve_details_by_slug("tom-hanks").unwrap().unwrap();
  let json = serde_json::to_value(&details).unwrap();
  assert!(json["name"].as_str().is_some_and(|n| !n.is_empty()));
  assert!(json["appearances"]["count"].is_object());
  assert!(json["appearances"]["shows"].is_array());

  assert_eq!(details.appearances.count.regular_shows, 2);
  assert_eq!(details.appearances.count.all_shows, 3);
  assert_eq!(details.appearances.shows[1].score, Some(1));

  assert!(guests.retrieve_by_slug("tom-hanx").unwrap().is_none());
}

#[test]
fn guest_listing_skips_placeholder_and_derives_slugs() {
  let guests = Guests::new(seeded());
  let all = guests.retrieve_all().unwrap();
  let names: Vec<_> = all.iter().map(|g| g.name.as_str()).collect();
  assert_eq!(names, ["Julia Louis-Dreyfus", "Tom Hanks"]);
  assert_eq!(
    guests.retrieve_all_slugs().unwrap(),
    ["julia-louis-dreyfus", "tom-hanks"]
  );
  assert_eq!(guests.retrieve_all_ids().unwrap(), [3, 1]);
}

#[test]
fn appearances_are_ordered_by_date() {
  let db = seeded();
  let hosts = Hosts::new(db.clone());
  let appearances = hosts.appearances().retrieve_appearances_by_id(1).unwrap();
  assert_eq!(appearances.count.regular_shows, 3);
  assert_eq!(appearances.count.all_shows, 6);
  assert!(appearances.shows.windows(2).all(|w| w[0].show.date <= w[1].show.date));

  let panelist = PanelistAppearances::new(db)
    .retrieve_appearances_by_id(2, ScoreMode::Integer)
    .unwrap();
  assert!(
    panelist
      .appearances
      .shows
      .windows(2)
      .all(|w| w[0].show.date <= w[1].show.date)
  );
}

#[test]
fn unknown_entities_have_empty_appearances() {
  let guests = Guests::new(seeded());
  let empty = guests.appearances().retrieve_appearances_by_slug("nobody").unwrap();
  assert!(empty.is_empty());
  assert_eq!(empty.count.all_shows, 0);
  assert!(guests.retrieve_details_by_id(-1).unwrap().is_none());
}

#[test]
fn host_carries_gender_and_pronouns() {
  let host = Hosts::new(seeded()).retrieve_by_id(1).unwrap().unwrap();
  assert_eq!(host.gender.as_deref(), Some("M"));
  assert_eq!(host.pronouns, ["he/him"]);
}

#[test]
fn scorekeeper_blank_slug_falls_back_to_name() {
  let scorekeepers = Scorekeepers::new(seeded());
  assert_eq!(
    scorekeepers.retrieve_all_slugs().unwrap(),
    ["bill-kurtis", "carl-kasell"]
  );
  let carl = scorekeepers.retrieve_details_by_id(2).unwrap().unwrap();
  assert_eq!(carl.info.slug, "carl-kasell");
  assert_eq!(carl.appearances.shows.len(), 1);
  assert_eq!(carl.appearances.shows[0].description.as_deref(), Some("Guest scorekeeper"));
  assert!(carl.appearances.shows[0].guest);
}

#[test]
fn pronouns_reference_table() {
  let pronouns = Pronouns::new(seeded());
  assert_eq!(pronouns.retrieve_all_ids().unwrap(), [1, 2, 3]);
  assert_eq!(pronouns.retrieve_all_as_map().unwrap()[&3], "they/them");
  assert_eq!(pronouns.retrieve_by_id(2).unwrap().unwrap().pronouns, "he/him");
  assert!(pronouns.retrieve_by_id(9).unwrap().is_none());
}

// ─── Locations ───────────────────────────────────────────────────────────────

#[test]
fn locations_sort_and_fallback_slug() {
  let locations = Locations::new(seeded());
  assert_eq!(locations.retrieve_all_ids(LocationSort::State).unwrap(), [2, 3]);
  assert_eq!(locations.retrieve_all_ids(LocationSort::Venue).unwrap(), [3, 2]);

  let carnegie = locations.retrieve_by_id(3).unwrap().unwrap();
  assert_eq!(carnegie.slug, "carnegie-hall-new-york-ny");
  assert_eq!(carnegie.state_name.as_deref(), Some("New York"));
  assert_eq!(carnegie.coordinates, None);

  let chase = locations.retrieve_by_slug("chase-auditorium-chicago-il").unwrap().unwrap();
  let coordinates = chase.coordinates.unwrap();
  assert_eq!(coordinates.latitude, dec!(41.8795));
  assert_eq!(coordinates.longitude, dec!(-87.6243));
}

#[test]
fn location_recordings() {
  let locations = Locations::new(seeded());
  let details = locations.retrieve_details_by_id(2).unwrap().unwrap();
  assert_eq!(details.recordings.count.regular_shows, 2);
  assert_eq!(details.recordings.count.all_shows, 5);
}

// ─── Panelists ───────────────────────────────────────────────────────────────

#[test]
fn panelist_listing_skips_placeholder() {
  let panelists = Panelists::new(seeded());
  assert_eq!(panelists.retrieve_all_ids().unwrap(), [5, 3, 2, 1]);
  let paula = panelists.retrieve_by_slug("paula-poundstone").unwrap().unwrap();
  assert_eq!(paula.pronouns, ["she/her", "they/them"]);
}

#[test]
fn panelist_appearance_counts_and_milestones() {
  let summary = PanelistAppearances::new(seeded())
    .retrieve_appearances_by_id(1, ScoreMode::Integer)
    .unwrap();
  let count = summary.appearances.count;
  assert_eq!((count.regular_shows, count.all_shows, count.shows_with_scores), (3, 6, 2));

  let milestones = summary.milestones.unwrap();
  assert_eq!(milestones.first.show_date, date(2018, 10, 20));
  assert_eq!(milestones.most_recent.show_id, 5);

  let last_regular = &summary.appearances.shows[4];
  assert_eq!(last_regular.show.show_id, 5);
  assert_eq!(last_regular.score, None);
  assert_eq!(last_regular.rank, None);

  let second = &summary.appearances.shows[1];
  assert_eq!(second.score, Some(Score::Integer(16)));
  assert_eq!(second.rank, Some(Rank::First));
}

#[test]
fn panelist_appearances_in_decimal_mode() {
  let summary = PanelistAppearances::new(seeded())
    .retrieve_appearances_by_slug("paula-poundstone", ScoreMode::Decimal)
    .unwrap();
  assert_eq!(summary.appearances.shows[1].score, Some(Score::Decimal(dec!(16.5))));
}

#[test]
fn panelist_without_appearances() {
  let db = seeded();
  let appearances = PanelistAppearances::new(db.clone());
  let summary = appearances.retrieve_appearances_by_id(5, ScoreMode::Integer).unwrap();
  assert!(summary.milestones.is_none());
  assert!(summary.appearances.is_empty());
  assert!(appearances.retrieve_yearly_appearances_by_id(5).unwrap().is_empty());

  let details = Panelists::new(db)
    .retrieve_details_by_id(5, ScoreMode::Integer)
    .unwrap()
    .unwrap();
  assert_eq!(details.info.slug, "adam-felber");
  assert!(details.statistics.is_none());
  assert_eq!(details.bluffs, BluffCounts::default());
}

#[test]
fn yearly_appearances_cover_every_show_year() {
  let db = seeded();
  let yearly = PanelistAppearances::new(db.clone())
    .retrieve_yearly_appearances_by_id(1)
    .unwrap();
  assert_eq!(yearly.into_iter().collect::<Vec<_>>(), [(2018, 2), (2019, 1)]);

  db.connection()
    .execute_batch("INSERT INTO ww_shows (showid, showdate, bestof) VALUES (7, '2020-01-04', 0);")
    .unwrap();
  let yearly = PanelistAppearances::new(db)
    .retrieve_yearly_appearances_by_id(1)
    .unwrap();
  assert_eq!(yearly[&2020], 0);
}

#[test]
fn scores_come_from_regular_shows_only() {
  let scores = PanelistScores::new(seeded());
  assert_eq!(scores.retrieve_scores_by_id(2).unwrap(), [12, 8, 10]);
  assert_eq!(
    scores.retrieve_scores_ordered_pair_by_slug("paula-poundstone").unwrap(),
    [(date(2018, 10, 20), 10), (date(2018, 10, 27), 16)]
  );

  let list = scores.retrieve_scores_list_by_id(1).unwrap();
  assert_eq!(list.shows, [date(2018, 10, 20), date(2018, 10, 27)]);
  assert_eq!(list.scores, [10, 16]);
}

#[test]
fn grouped_scores_span_the_global_range() {
  let scores = PanelistScores::new(seeded());
  let grouped = scores.retrieve_scores_grouped_list_by_id(2).unwrap();
  assert_eq!(grouped.score, (5..=20).collect::<Vec<_>>());
  assert_eq!(grouped.count.iter().sum::<u32>(), 3);

  let pairs = scores.retrieve_scores_grouped_ordered_pair_by_id(2).unwrap();
  assert_eq!(pairs[3], (8, 1));
  assert_eq!(pairs[4], (9, 0));
  assert_eq!(pairs[5], (10, 1));

  assert!(scores.retrieve_scores_grouped_list_by_id(5).unwrap().score.is_empty());
  assert!(scores.retrieve_scores_grouped_list_by_slug("nobody").unwrap().count.is_empty());
}

#[test]
fn decimal_grouped_scores_use_half_points() {
  let scores = PanelistDecimalScores::new(seeded());
  let grouped = scores.retrieve_scores_grouped_list_by_id(1).unwrap();
  assert_eq!(grouped.score.len(), 32);
  assert_eq!(grouped.score.first(), Some(&dec!(5)));
  assert_eq!(grouped.score.last(), Some(&dec!(20.5)));

  let pairs = scores.retrieve_scores_grouped_ordered_pair_by_id(1).unwrap();
  assert!(pairs.contains(&(dec!(16.5), 1)));
  assert!(pairs.contains(&(dec!(10), 1)));
  assert!(pairs.contains(&(dec!(16), 0)));

  assert_eq!(scores.retrieve_scores_by_id(1).unwrap(), [dec!(10), dec!(16.5)]);
}

#[test]
fn decimal_scores_need_the_decimal_column() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  conn
    .execute_batch(
      "CREATE TABLE ww_showpnlmap (
         showpnlmapid INTEGER PRIMARY KEY,
         showid INTEGER,
         panelistid INTEGER,
         panelistscore INTEGER
       );",
    )
    .unwrap();
  let db = Database::from_connection(conn).unwrap();
  assert!(!db.has_decimal_scores().unwrap());

  let scores = PanelistDecimalScores::new(db);
  assert!(matches!(
    scores.retrieve_scores_by_id(1),
    Err(Error::DecimalScoresUnavailable)
  ));

  assert!(seeded().has_decimal_scores().unwrap());
}

#[test]
fn bluff_counts_skip_repeats() {
  let statistics = PanelistStatistics::new(seeded());
  assert_eq!(
    statistics.retrieve_bluffs_by_id(1).unwrap(),
    BluffCounts { chosen: 2, correct: 1 }
  );
  assert_eq!(
    statistics.retrieve_bluffs_by_slug("mo-rocca").unwrap(),
    BluffCounts { chosen: 1, correct: 1 }
  );
  assert_eq!(
    statistics.retrieve_bluffs_by_id(3).unwrap(),
    BluffCounts { chosen: 0, correct: 1 }
  );
}

#[test]
fn rank_counts_cover_regular_shows() {
  let statistics = PanelistStatistics::new(seeded());
  assert_eq!(
    statistics.retrieve_rank_info_by_id(2).unwrap(),
    RankCounts { first: 1, first_tied: 1, third: 1, ..RankCounts::default() }
  );
  assert_eq!(
    statistics.retrieve_rank_info_by_id(1).unwrap(),
    RankCounts { first: 1, second: 1, ..RankCounts::default() }
  );
}

#[test]
fn statistics_aggregate_scores_and_ranks() {
  let statistics = PanelistStatistics::new(seeded());

  let paula = statistics.retrieve_statistics_by_id(1, ScoreMode::Integer).unwrap().unwrap();
  assert_eq!(paula.scoring.minimum, 10);
  assert_eq!(paula.scoring.maximum, 16);
  assert_eq!(paula.scoring.mean, 13.0);
  assert_eq!(paula.scoring.median, 13.0);
  assert_eq!(paula.scoring.standard_deviation, 3.0);
  assert_eq!(paula.scoring.total, 26);
  assert!(paula.scoring_decimal.is_none());
  assert_eq!(paula.ranking.percentage.first, 50.0);
  assert_eq!(paula.ranking.percentage.second, 50.0);

  let mo = statistics.retrieve_statistics_by_slug("mo-rocca", ScoreMode::Integer).unwrap().unwrap();
  assert_eq!(mo.ranking.percentage.first_tied, 33.33333);
  assert_eq!(mo.ranking.percentage.second, 0.0);

  let decimal = statistics.retrieve_statistics_by_id(1, ScoreMode::Decimal).unwrap().unwrap();
  let scoring = decimal.scoring_decimal.unwrap();
  assert_eq!(scoring.total, dec!(26.5));
  assert_eq!(scoring.mean, dec!(13.25));
  assert_eq!(scoring.standard_deviation, dec!(3.25));

  assert!(statistics.retrieve_statistics_by_id(5, ScoreMode::Integer).unwrap().is_none());
}

// ─── Shows ───────────────────────────────────────────────────────────────────

#[test]
fn show_by_date_string() {
  let shows = Shows::new(seeded());
  let show = shows.retrieve_by_date_string("2018-10-27").unwrap().unwrap();
  let json = serde_json::to_value(&show).unwrap();
  assert_eq!(json["date"], "2018-10-27");

  assert!(shows.retrieve_by_date_string("2018-02-30").unwrap().is_none());
  assert!(shows.retrieve_by_date_string("not a date").unwrap().is_none());
}

#[test]
fn show_utility_dates() {
  let utility = ShowUtility::new(seeded());
  assert_eq!(utility.convert_date_to_id(2018, 10, 27).unwrap(), Some(2));
  assert_eq!(utility.convert_date_to_id(2018, 2, 30).unwrap(), None);
  assert_eq!(utility.convert_id_to_date(4).unwrap(), Some(date(2019, 1, 5)));
  assert!(utility.date_exists(2019, 2, 2).unwrap());
  assert!(!utility.date_exists(2019, 2, 3).unwrap());
  assert!(utility.id_exists(6).unwrap());
  assert!(!utility.id_exists(-1).unwrap());
}

#[test]
fn repeat_shows_carry_their_original() {
  let shows = Shows::new(seeded());
  let repeat = shows.retrieve_by_id(4).unwrap().unwrap();
  assert!(repeat.repeat_show);
  assert_eq!(repeat.original_show_id, Some(2));
  assert_eq!(repeat.original_show_date, Some(date(2018, 10, 27)));

  let regular = shows.retrieve_by_id(1).unwrap().unwrap();
  assert_eq!(regular.original_show_id, None);
  assert_eq!(regular.url.as_deref(), Some("https://example.org/2018-10-20"));
  assert_eq!(shows.retrieve_by_id(5).unwrap().unwrap().url, None);
}

#[test]
fn show_listings() {
  let shows = Shows::new(seeded());
  assert_eq!(shows.retrieve_all_ids().unwrap(), [1, 2, 3, 4, 5, 6]);
  assert_eq!(shows.retrieve_years().unwrap(), [2018, 2019]);
  assert_eq!(shows.retrieve_months_by_year(2019).unwrap(), [1, 2, 6]);
  assert_eq!(
    shows.retrieve_all_show_years_months().unwrap(),
    ["2018-10", "2018-12", "2019-01", "2019-02", "2019-06"]
  );
  assert_eq!(shows.retrieve_all_dates_tuple().unwrap()[0], (2018, 10, 20));
  assert_eq!(shows.retrieve_by_year(2018).unwrap().len(), 3);
  assert_eq!(shows.retrieve_by_year_month(2018, 10).unwrap().len(), 2);
  assert!(shows.retrieve_by_year_month(2018, 13).unwrap().is_empty());
}

#[test]
fn recent_shows_follow_the_given_day() {
  let shows = Shows::new(seeded());
  let recent = shows.retrieve_recent(date(2018, 11, 20), 7, 32).unwrap();
  let ids: Vec<_> = recent.iter().map(|s| s.id).collect();
  assert_eq!(ids, [1, 2]);

  let details = shows
    .retrieve_recent_details(date(2019, 1, 1), 7, 5, ScoreMode::Integer)
    .unwrap();
  assert_eq!(details.len(), 2);
  assert_eq!(details[1].info.show.id, 4);
}

#[test]
fn show_details_compose_every_part() {
  let shows = Shows::new(seeded());
  let details = shows
    .retrieve_details_by_date_string("2018-10-27", ScoreMode::Integer)
    .unwrap()
    .unwrap();

  assert_eq!(details.info.description.as_deref(), Some("Live from Chicago."));
  assert_eq!(details.info.notes, None);
  assert_eq!(details.info.location.slug, "chase-auditorium-chicago-il");
  assert_eq!(details.info.location.state_name.as_deref(), Some("Illinois"));
  assert_eq!(details.info.host.person.slug, "peter-sagal");
  assert_eq!(details.info.scorekeeper.person.name, "Bill Kurtis");

  let panelists: Vec<_> = details.panelists.iter().map(|p| p.person.id).collect();
  assert_eq!(panelists, [1, 3, 2]);
  assert_eq!(details.panelists[0].score, Some(Score::Integer(16)));

  let guests: Vec<_> = details.guests.iter().map(|g| g.person.slug.as_str()).collect();
  assert_eq!(guests, ["julia-louis-dreyfus", "tom-hanks"]);
  assert!(details.guests[0].score_exception);
}

#[test]
fn bluff_segments_allow_either_side_missing() {
  let info = ShowInfo::new(seeded());

  let both = info.retrieve_bluff_info_by_id(1).unwrap();
  assert_eq!(both.len(), 1);
  assert_eq!(both[0].chosen_panelist.as_ref().map(|p| p.id), Some(1));
  assert_eq!(both[0].correct_panelist.as_ref().map(|p| p.id), Some(2));

  let split = info.retrieve_bluff_info_by_id(2).unwrap();
  assert_eq!(split.iter().map(|b| b.segment).collect::<Vec<_>>(), [1, 2]);
  assert_eq!(split[0].chosen_panelist.as_ref().map(|p| p.slug.as_str()), Some("mo-rocca"));
  assert!(split[0].correct_panelist.is_none());
  assert!(split[1].chosen_panelist.is_none());
  assert_eq!(split[1].correct_panelist.as_ref().map(|p| p.id), Some(3));

  let neither = info.retrieve_bluff_info_by_id(5).unwrap();
  assert!(neither[0].chosen_panelist.is_none());
  assert!(neither[0].correct_panelist.is_none());

  assert!(info.retrieve_bluff_info_by_id(6).unwrap().is_empty());
}

#[test]
fn single_show_info_parts() {
  let info = ShowInfo::new(seeded());

  let core = info.retrieve_core_info_by_id(5).unwrap().unwrap();
  assert_eq!(core.location.slug, "carnegie-hall-new-york-ny");
  assert_eq!(core.scorekeeper.person.slug, "carl-kasell");
  assert!(core.scorekeeper.guest);
  assert!(info.retrieve_core_info_by_id(99).unwrap().is_none());

  let panelists = info.retrieve_panelist_info_by_id(5, ScoreMode::Integer).unwrap();
  let order: Vec<_> = panelists.iter().map(|p| p.person.id).collect();
  assert_eq!(order, [2, 3, 1]);
  assert_eq!(panelists[0].rank, Some(Rank::FirstTied));
  assert_eq!(panelists[2].score, None);

  let decimal = info.retrieve_panelist_info_by_id(2, ScoreMode::Decimal).unwrap();
  assert_eq!(decimal[0].score, Some(Score::Decimal(dec!(16.5))));

  let guests = info.retrieve_guest_info_by_id(1).unwrap();
  assert_eq!(guests[0].person.name, "Tom Hanks");
  assert_eq!(guests[0].score, Some(2));
}

#[test]
fn batch_info_is_keyed_by_show() {
  let multiple = ShowInfoMultiple::new(seeded());

  let core = multiple.retrieve_core_info_by_ids(&[4, 1]).unwrap();
  assert_eq!(core.keys().copied().collect::<Vec<_>>(), [1, 4]);
  assert_eq!(core[&4].show.original_show_date, Some(date(2018, 10, 27)));

  assert!(multiple.retrieve_core_info_by_ids(&[1, -1]).unwrap().is_empty());
  assert!(multiple.retrieve_guest_info_by_ids(&[]).unwrap().is_empty());

  let all = multiple.retrieve_core_info_all().unwrap();
  assert_eq!(all.len(), 6);

  let panelists = multiple.retrieve_panelist_info_all(ScoreMode::Integer).unwrap();
  assert_eq!(panelists[&1].len(), 3);

  let bluffs = multiple.retrieve_bluff_info_by_ids(&[2, 3]).unwrap();
  assert_eq!(bluffs[&2].len(), 2);
  assert_eq!(bluffs[&3].len(), 1);

  let guests = multiple.retrieve_guest_info_all().unwrap();
  assert!(!guests.contains_key(&5));
}

#[test]
fn details_by_ids_are_ordered_by_date() {
  let shows = Shows::new(seeded());
  let details = shows.retrieve_details_by_ids(&[5, 2], ScoreMode::Integer).unwrap();
  let ids: Vec<_> = details.iter().map(|d| d.info.show.id).collect();
  assert_eq!(ids, [2, 5]);

  assert!(shows.retrieve_details_by_ids(&[2, 1 << 31], ScoreMode::Integer).unwrap().is_empty());
  assert_eq!(shows.retrieve_all_details(ScoreMode::Integer).unwrap().len(), 6);
}

#[test]
fn show_counts_add_up() {
  let shows = Shows::new(seeded());
  assert_eq!(shows.retrieve_counts_by_year(2018).unwrap(), ShowCounts::new(2, 1, 0, 0));
  assert_eq!(shows.retrieve_counts_by_year(2019).unwrap(), ShowCounts::new(1, 0, 1, 1));
  assert_eq!(shows.retrieve_counts_by_year(1999).unwrap(), ShowCounts::default());

  for counts in shows.retrieve_all_counts().unwrap().values() {
    assert_eq!(
      counts.total,
      counts.regular + counts.best_of + counts.repeat + counts.repeat_best_of
    );
  }
}

#[test]
fn scores_by_year_group_per_show() {
  let shows = Shows::new(seeded());
  let scores = shows.retrieve_scores_by_year(2018).unwrap();
  assert_eq!(scores.len(), 2);
  assert_eq!(scores[0].date, date(2018, 10, 20));
  assert_eq!(scores[0].scores, [6, 10, 12]);
  assert_eq!(scores[1].scores, [8, 12, 16]);

  let scores = shows.retrieve_scores_by_year(2019).unwrap();
  assert_eq!(scores.len(), 1);
  assert_eq!(scores[0].scores, [10, 10]);
}

#[test]
fn random_show_exists() {
  let shows = Shows::new(seeded());
  let id = shows.retrieve_random_id().unwrap().unwrap();
  assert!(shows.utility().id_exists(id).unwrap());
  assert!(shows.retrieve_random_date().unwrap().is_some());
}
