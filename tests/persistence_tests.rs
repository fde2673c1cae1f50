//! Workout log persistence: legacy browser logs, SQLite storage, reloads.

use chrono::{TimeZone, Utc};
use mapty::database::SqliteStore;
use mapty::storage::{
    KeyValueStore, MemoryStore, WORKOUTS_KEY, clear_workouts, load_workouts, save_workouts,
};
use mapty::types::{Activity, Coords, Workout, WorkoutType};

mod common;

/// A log as a browser page keeps it: JS ISO dates, integral numbers.
const BROWSER_LOG: &str = r#"[
  {"date":"2024-04-14T10:15:30.123Z","id":"3089730123","coords":[48.85,2.35],
   "distance":10,"duration":60,"type":"running","cadence":150,"pace":6,
   "description":"Running on April 14"},
  {"date":"2024-04-15T07:00:00.000Z","id":"3164400000","coords":[48.86,2.36],
   "distance":20,"duration":60,"type":"cycling","elevationGain":500,"speed":20,
   "description":"Cycling on April 15"}
]"#;

#[test]
fn test_browser_log_loads_as_variants() {
    let mut store = MemoryStore::new();
    store.set(WORKOUTS_KEY, BROWSER_LOG).unwrap();

    let log = load_workouts(&store);
    assert_eq!(log.len(), 2);

    let run = &log[0];
    assert_eq!(run.kind(), WorkoutType::Running);
    assert_eq!(run.id(), "3089730123");
    assert_eq!(run.coords(), Coords::new(48.85, 2.35));
    assert_eq!(run.pace(), Some(6.0));
    assert_eq!(
        run.activity(),
        &Activity::Running {
            cadence: 150.0,
            pace: 6.0
        }
    );
    assert_eq!(
        run.date(),
        Utc.with_ymd_and_hms(2024, 4, 14, 10, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123)
    );

    let ride = &log[1];
    assert_eq!(ride.kind(), WorkoutType::Cycling);
    assert_eq!(ride.speed(), Some(20.0));
    assert_eq!(ride.description(), "Cycling on April 15");
}

#[test]
fn test_round_trip_keeps_plain_fields_and_metrics() {
    let t = Utc.with_ymd_and_hms(2024, 6, 1, 18, 45, 0).unwrap();
    let log = vec![
        Workout::running(&t, Coords::new(-33.86, 151.2), 7.5, 40.0, 172.0),
        Workout::cycling(&t, Coords::new(35.68, 139.69), 42.0, 95.0, 0.0),
    ];
    let mut store = MemoryStore::new();
    save_workouts(&mut store, &log).unwrap();

    let back = load_workouts(&store);
    assert_eq!(back, log);
    for (a, b) in back.iter().zip(&log) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.date(), b.date());
        assert_eq!(a.coords(), b.coords());
        assert_eq!(a.distance(), b.distance());
        assert_eq!(a.duration(), b.duration());
        assert_eq!(a.metric(), b.metric());
    }
}

#[test]
fn test_sqlite_store_keeps_log_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.sqlite3");

    let t = Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap();
    let run = Workout::running(&t, Coords::new(1.0, 2.0), 10.0, 60.0, 150.0);
    {
        let mut store = SqliteStore::open(&path).unwrap();
        save_workouts(&mut store, std::slice::from_ref(&run)).unwrap();
    }

    let mut store = SqliteStore::open(&path).unwrap();
    assert_eq!(load_workouts(&store), vec![run]);

    clear_workouts(&mut store).unwrap();
    assert!(load_workouts(&store).is_empty());
}

#[test]
fn test_corrupt_log_is_silently_empty() {
    let mut store = SqliteStore::in_memory().unwrap();
    store.set(WORKOUTS_KEY, "[{\"type\":\"running\"").unwrap();
    assert!(load_workouts(&store).is_empty());

    let mut memory = MemoryStore::new();
    memory.set(WORKOUTS_KEY, "not json at all").unwrap();
    let session = common::start(memory);
    assert!(session.workouts().is_empty());
    assert!(session.list().is_empty());
    assert!(session.alerter().is_empty());
}

#[test]
fn test_unreadable_record_does_not_cost_the_rest_of_the_log() {
    let legacy = r#"[
      {"date":"2024-04-14T10:15:30.123Z","id":"3089730123","coords":[48.85,2.35],
       "distance":10,"duration":60,"type":"running","cadence":150,"pace":6,
       "description":"Running on April 14"},
      {"date":"2024-04-14T11:00:00.000Z","id":"3092400000","coords":[48.85,2.35],
       "distance":0,"duration":30,"type":"running","cadence":150,"pace":null,
       "description":"Running on April 14"}
    ]"#;
    let mut store = MemoryStore::new();
    store.set(WORKOUTS_KEY, legacy).unwrap();

    let mut session = common::located(store);
    assert_eq!(session.workouts().len(), 1);
    assert_eq!(session.workouts()[0].id(), "3089730123");

    common::fill(&mut session, common::HOME, WorkoutType::Cycling, "20", "60", "500");
    session
        .submit_at(&Utc.with_ymd_and_hms(2024, 4, 16, 8, 0, 0).unwrap())
        .unwrap();

    let stored = load_workouts(session.store());
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id(), "3089730123");
    assert_eq!(stored[1].kind(), WorkoutType::Cycling);
}
