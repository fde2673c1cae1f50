use anyhow::bail;
use chrono::{DateTime, TimeZone, Utc};
use mapty::app::Session;
use mapty::form::Field;
use mapty::map::{FixedPosition, MapSettings, RecordingMap};
use mapty::storage::{KeyValueStore, MemoryStore};
use mapty::types::{Coords, WorkoutType};

pub type TestSession<S = MemoryStore> = Session<S, RecordingMap, Vec<String>>;

pub const HOME: Coords = Coords::new(48.8566, 2.3522);

/// Memory store whose writes or removals can be made to fail.
#[allow(dead_code)]
#[derive(Debug, Default, Clone)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_set: bool,
    pub fail_remove: bool,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_set {
            bail!("quota exceeded writing {key:?}");
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        if self.fail_remove {
            bail!("storage is read-only");
        }
        self.inner.remove(key)
    }
}

/// Session over `store`, not yet located.
#[allow(dead_code)]
pub fn start<S: KeyValueStore>(store: S) -> TestSession<S> {
    Session::start(store, RecordingMap::new(), MapSettings::default(), Vec::new())
        .expect("session should start")
}

/// Session over `store` with the map loaded at [`HOME`].
#[allow(dead_code)]
pub fn located<S: KeyValueStore>(store: S) -> TestSession<S> {
    let mut session = start(store);
    session
        .locate(&mut FixedPosition(Some(HOME)))
        .expect("fixed position should resolve");
    session
}

#[allow(dead_code)]
pub fn at_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().expect("valid timestamp")
}

/// Click the map at `at`, fill the form and leave it unsubmitted.
#[allow(dead_code)]
pub fn fill<S: KeyValueStore>(
    session: &mut TestSession<S>,
    at: Coords,
    kind: WorkoutType,
    distance: &str,
    duration: &str,
    extra: &str,
) {
    session.on_map_click(at).expect("map should be loaded");
    session.select_type(kind);
    session.set_input(Field::Distance, distance);
    session.set_input(Field::Duration, duration);
    match kind {
        WorkoutType::Running => session.set_input(Field::Cadence, extra),
        WorkoutType::Cycling => session.set_input(Field::Elevation, extra),
    }
}
