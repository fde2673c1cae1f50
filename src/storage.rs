//! Key-value storage and the workout log kept in it.

use crate::types::Workout;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Key the whole workout log is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

/// String key-value store, the shape of a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

pub fn save_workouts<S: KeyValueStore + ?Sized>(store: &mut S, workouts: &[Workout]) -> Result<()> {
    let json = serde_json::to_string(workouts).context("encoding workout log")?;
    store
        .set(WORKOUTS_KEY, &json)
        .context("writing workout log")?;
    crate::dlog!("saved {} workouts ({} bytes)", workouts.len(), json.len());
    Ok(())
}

/// Read the workout log. A missing, unreadable or corrupt log is an empty one;
/// records that do not decode are skipped one by one.
pub fn load_workouts<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Workout> {
    let raw = match store.get(WORKOUTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(err = %e, "cannot read workout log; starting empty");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Option<Vec<JsonValue>>>(&raw) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(err = %e, "workout log is corrupt; starting empty");
            return Vec::new();
        }
    };

    let total = records.len();
    let mut out = Vec::with_capacity(total);
    for (idx, record) in records.into_iter().enumerate() {
        let id = record
            .get("id")
            .and_then(JsonValue::as_str)
            .unwrap_or("?")
            .to_string();
        match serde_json::from_value::<Workout>(record) {
            Ok(w) => out.push(w),
            Err(e) => tracing::warn!(idx, id = %id, err = %e, "skipping unreadable workout record"),
        }
    }

    tracing::info!(workouts = out.len(), skipped = total - out.len(), "workout log loaded");
    out
}

pub fn clear_workouts<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(WORKOUTS_KEY).context("removing workout log")
}
